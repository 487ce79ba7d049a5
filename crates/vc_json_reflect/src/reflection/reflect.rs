use core::any::{Any, TypeId};
use core::fmt;
use std::borrow::Cow;
use std::time::SystemTime;

use crate::Number;
use crate::impls::NonGenericTypeDescCell;
use crate::info::{ClassInfo, DynamicTyped, JsonFamily, TypeDesc, Typed};

// -----------------------------------------------------------------------------
// Reflect

/// A value the encoder can walk.
///
/// `Reflect` tells the encoder what a value looks like through
/// [`reflect_ref`](Reflect::reflect_ref): a terminal, a transparent wrapper,
/// a built-in container or a class object. It extends [`DynamicTyped`], so
/// the static [`TypeDesc`] of the concrete type is reachable from a trait
/// object.
///
/// Implementations for std types live in [`impls`](crate::impls). Classes
/// get theirs from [`impl_class!`](crate::impl_class).
///
/// # Examples
///
/// ```
/// use vc_json_reflect::{Reflect, ReflectRef};
///
/// let value: &dyn Reflect = &Some(7_u8);
/// let ReflectRef::Forward(inner) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(inner.downcast_ref::<u8>(), Some(&7));
/// ```
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Casts this value to a trait object.
    ///
    /// Implementations return `self`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Describes the shape of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Returns the [`TypeId`] of the underlying value.
    ///
    /// Unlike [`TypeDesc::id`], this is never shared with the pointee of a
    /// smart pointer.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        let any: &dyn Any = self;
        any.type_id()
    }

    /// Returns the address of the underlying value.
    #[inline]
    pub fn address(&self) -> usize {
        (self as *const dyn Reflect).cast::<()>().addr()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_desc().path())
    }
}

/// `dyn Reflect` is the universal supertype in compatibility checks.
impl Typed for dyn Reflect {
    fn type_desc() -> &'static TypeDesc {
        static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
        CELL.get_or_init(|| {
            TypeDesc::of::<dyn Reflect>(JsonFamily::Dynamic).with_path("dyn vc_json_reflect::Reflect")
        })
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// The shape of a [`Reflect`] value.
///
/// Terminals carry their value. Wrappers (`Some`, `Box`, `Arc`, an
/// initialized `OnceLock`) forward to the wrapped value, so `Forward`
/// never produces a node by itself.
pub enum ReflectRef<'a> {
    Null,
    Bool(bool),
    Number(Number),
    Text(Cow<'a, str>),
    Date(SystemTime),
    Forward(&'a dyn Reflect),
    Sequence(&'a dyn Sequence),
    Associative(&'a dyn Associative),
    /// A class object, mapped through its reflected attributes.
    Object(&'static ClassInfo),
}

impl ReflectRef<'_> {
    /// Returns the [`JsonFamily`] this shape produces.
    ///
    /// [`Forward`](ReflectRef::Forward) reports [`JsonFamily::Dynamic`].
    pub fn family(&self) -> JsonFamily {
        match self {
            Self::Null => JsonFamily::Null,
            Self::Bool(_) => JsonFamily::Boolean,
            Self::Number(_) => JsonFamily::Number,
            Self::Text(_) => JsonFamily::Text,
            Self::Date(_) => JsonFamily::Temporal,
            Self::Forward(_) => JsonFamily::Dynamic,
            Self::Sequence(_) => JsonFamily::Sequence,
            Self::Associative(_) => JsonFamily::Associative,
            Self::Object(_) => JsonFamily::Object,
        }
    }
}

impl fmt::Debug for ReflectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Number(v) => f.debug_tuple("Number").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Self::Forward(v) => f.debug_tuple("Forward").field(v).finish(),
            Self::Sequence(v) => f.debug_tuple("Sequence").field(&v.len()).finish(),
            Self::Associative(v) => f.debug_tuple("Associative").field(&v.len()).finish(),
            Self::Object(info) => f.debug_tuple("Object").field(&info.type_path()).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// Read-only view of a built-in sequence.
///
/// Emitted as a JSON array, in iteration order.
pub trait Sequence {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// Read-only view of a built-in string keyed map.
///
/// Emitted as a JSON object, in iteration order.
pub trait Associative {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{Reflect, ReflectRef};
    use std::sync::Arc;

    #[test]
    fn downcast_through_trait_object() {
        let value: &dyn Reflect = &String::from("x");
        assert!(value.is::<String>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("x"));
        assert!(value.downcast_ref::<u8>().is_none());
    }

    #[test]
    fn smart_pointers_keep_their_own_type_id() {
        let value = Arc::new(5_i32);
        let outer: &dyn Reflect = &value;
        let ReflectRef::Forward(inner) = outer.reflect_ref() else {
            panic!("Arc must forward");
        };

        assert!(inner.is::<i32>());
        assert_ne!(outer.value_type_id(), inner.value_type_id());
        assert_eq!(outer.reflect_type_desc(), inner.reflect_type_desc());
    }
}
