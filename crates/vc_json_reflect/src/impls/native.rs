use std::borrow::Cow;

use crate::impls::utils::{impl_as_reflect, impl_non_generic_typed};
use crate::{Number, Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Numbers

macro_rules! impl_number {
    ($variant:ident as $wide:ty: $($ty:ty),+ $(,)?) => {$(
        impl_non_generic_typed!($ty, Number);

        impl Reflect for $ty {
            impl_as_reflect!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Number(Number::$variant(<$wide>::from(*self)))
            }
        }
    )+};
}

impl_number!(Signed as i64: i8, i16, i32, i64);
impl_number!(Unsigned as u64: u8, u16, u32, u64);
impl_number!(Float as f64: f32, f64);

// `From` is not implemented between pointer sized and fixed width integers.
impl_non_generic_typed!(isize, Number);
impl_non_generic_typed!(usize, Number);

impl Reflect for isize {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Number(Number::Signed(*self as i64))
    }
}

impl Reflect for usize {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Number(Number::Unsigned(*self as u64))
    }
}

// -----------------------------------------------------------------------------
// Others

impl_non_generic_typed!(bool, Boolean);
impl_non_generic_typed!(char, Text);
impl_non_generic_typed!(&'static str, Text);
impl_non_generic_typed!(String, Text);
impl_non_generic_typed!((), Null);

impl Reflect for bool {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Bool(*self)
    }
}

impl Reflect for char {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Text(Cow::Owned(self.to_string()))
    }
}

impl Reflect for &'static str {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Text(Cow::Borrowed(*self))
    }
}

impl Reflect for String {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Text(Cow::Borrowed(self.as_str()))
    }
}

impl Reflect for () {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Null
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{JsonFamily, Typed};
    use crate::{Number, Reflect, ReflectRef};

    #[test]
    fn numbers_widen() {
        assert!(matches!(7_u8.reflect_ref(), ReflectRef::Number(Number::Unsigned(7))));
        assert!(matches!((-3_i16).reflect_ref(), ReflectRef::Number(Number::Signed(-3))));
        assert!(matches!(usize::MAX.reflect_ref(), ReflectRef::Number(Number::Unsigned(_))));
        assert_eq!(<f32 as Typed>::type_desc().family(), JsonFamily::Number);
    }

    #[test]
    fn text_families() {
        assert_eq!(<char as Typed>::type_desc().family(), JsonFamily::Text);
        assert_eq!(<&'static str as Typed>::type_desc().family(), JsonFamily::Text);
        let ReflectRef::Text(text) = 'x'.reflect_ref() else {
            panic!("char must be text");
        };
        assert_eq!(text, "x");
    }
}
