use std::sync::{Arc, OnceLock};

use crate::impls::utils::{generic_type_desc, impl_as_reflect};
use crate::info::{TypeDesc, Typed};
use crate::{Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Optional values

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_desc() -> &'static TypeDesc {
        generic_type_desc!(T::type_desc().family())
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_as_reflect!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Some(value) => ReflectRef::Forward(value),
            None => ReflectRef::Null,
        }
    }
}

impl<T: Reflect + Typed> Typed for OnceLock<T> {
    fn type_desc() -> &'static TypeDesc {
        generic_type_desc!(T::type_desc().family())
    }
}

/// An uninitialized cell maps to `null`.
impl<T: Reflect + Typed> Reflect for OnceLock<T> {
    impl_as_reflect!();

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self.get() {
            Some(value) => ReflectRef::Forward(value),
            None => ReflectRef::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Smart pointers
//
// Transparent: a pointer shares the descriptor of its pointee.

impl<T: Reflect + Typed + ?Sized> Typed for Box<T> {
    #[inline]
    fn type_desc() -> &'static TypeDesc {
        T::type_desc()
    }
}

impl<T: Reflect + Typed + ?Sized> Reflect for Box<T> {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Forward((**self).as_reflect())
    }
}

impl<T: Reflect + Typed + ?Sized> Typed for Arc<T> {
    #[inline]
    fn type_desc() -> &'static TypeDesc {
        T::type_desc()
    }
}

impl<T: Reflect + Typed + ?Sized> Reflect for Arc<T> {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Forward((**self).as_reflect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use crate::info::{JsonFamily, Typed};
    use crate::{Reflect, ReflectRef};

    #[test]
    fn option_inherits_family() {
        assert_eq!(<Option<String> as Typed>::type_desc().family(), JsonFamily::Text);
        assert_eq!(<Option<Vec<u8>> as Typed>::type_desc().family(), JsonFamily::Sequence);
        assert!(<Option<u8> as Typed>::type_desc().is::<Option<u8>>());
        assert!(matches!(None::<u8>.reflect_ref(), ReflectRef::Null));
    }

    #[test]
    fn boxed_dynamic_value_forwards() {
        let value: Box<dyn Reflect> = Box::new(3_u16);
        assert_eq!(<Box<dyn Reflect> as Typed>::type_desc().family(), JsonFamily::Dynamic);
        let ReflectRef::Forward(inner) = value.reflect_ref() else {
            panic!("Box must forward");
        };
        assert_eq!(inner.downcast_ref::<u16>(), Some(&3));
    }

    #[test]
    fn empty_once_lock_is_null() {
        let cell = OnceLock::<String>::new();
        assert!(matches!(cell.reflect_ref(), ReflectRef::Null));
        cell.set("x".to_owned()).unwrap();
        assert!(matches!(cell.reflect_ref(), ReflectRef::Forward(_)));
    }
}
