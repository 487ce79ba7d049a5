use core::any::{Any, TypeId};
use core::fmt;

use crate::info::JsonFamily;

// -----------------------------------------------------------------------------
// TypeDesc

/// Static description of a Rust type as the mapper sees it.
///
/// A descriptor carries the [`TypeId`], a type path, the [`JsonFamily`] and
/// an optional parent. Parents form a single inheritance chain that the
/// getter/field compatibility test walks to decide whether one type is a
/// supertype of another. The descriptor of `dyn Reflect` is a supertype of
/// every type.
///
/// Descriptors are obtained through [`Typed::type_desc`] and live for the
/// whole program.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::info::{JsonFamily, Typed};
///
/// let desc = <Vec<i32> as Typed>::type_desc();
/// assert_eq!(desc.family(), JsonFamily::Sequence);
/// assert_eq!(desc.name(), "Vec<i32>");
/// assert!(desc.is::<Vec<i32>>());
/// ```
#[derive(Clone)]
pub struct TypeDesc {
    id: TypeId,
    path: &'static str,
    family: JsonFamily,
    // Resolved lazily, so a class may name its parent before it is built.
    parent: Option<fn() -> &'static TypeDesc>,
}

impl TypeDesc {
    /// Creates a descriptor for `T`, using [`core::any::type_name`] as path.
    #[inline]
    pub fn of<T: Any + ?Sized>(family: JsonFamily) -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
            family,
            parent: None,
        }
    }

    /// Replaces the type path.
    ///
    /// The path should not start with `::`.
    #[inline]
    pub fn with_path(self, path: &'static str) -> Self {
        Self { path, ..self }
    }

    /// Sets the parent descriptor.
    #[inline]
    pub fn with_parent(self, parent: fn() -> &'static TypeDesc) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns the full type path.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type name without module path, generics kept.
    pub fn name(&self) -> &'static str {
        let path = self.path;
        let head = path.find('<').unwrap_or(path.len());
        match path[..head].rfind("::") {
            Some(index) => &path[index + 2..],
            None => path,
        }
    }

    /// Returns the [`JsonFamily`].
    #[inline(always)]
    pub const fn family(&self) -> JsonFamily {
        self.family
    }

    /// Returns the parent descriptor, if any.
    #[inline]
    pub fn parent(&self) -> Option<&'static TypeDesc> {
        self.parent.map(|parent| parent())
    }

    /// Iterates over the parent chain, nearest first.
    #[inline]
    pub fn ancestors(&self) -> impl Iterator<Item = &'static TypeDesc> {
        core::iter::successors(self.parent(), |desc| desc.parent())
    }

    /// Returns `true` if a value of `other` can be used where `self` is
    /// expected: same type, an ancestor of `other`, or `dyn Reflect`.
    pub fn is_supertype_of(&self, other: &TypeDesc) -> bool {
        self.family == JsonFamily::Dynamic
            || self.id == other.id
            || other.ancestors().any(|ancestor| ancestor.id == self.id)
    }
}

/// This implementation purely relies on the [`TypeId`].
impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

/// This implementation purely relies on the [`TypeId`].
impl core::hash::Hash for TypeDesc {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// This implementation only outputs the type path.
impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeDesc`].
///
/// Implemented for the supported std types in [`impls`](crate::impls) and
/// for classes by [`impl_class!`](crate::impl_class).
pub trait Typed: Any {
    /// Returns the static descriptor.
    fn type_desc() -> &'static TypeDesc;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch for [`Typed`].
///
/// Auto implemented for all types that implement [`Typed`].
pub trait DynamicTyped {
    /// Returns the descriptor of the concrete type behind a trait object.
    fn reflect_type_desc(&self) -> &'static TypeDesc;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_desc(&self) -> &'static TypeDesc {
        Self::type_desc()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeDesc;
    use crate::Reflect;
    use crate::info::{JsonFamily, Typed};

    #[test]
    fn name_strips_module_path() {
        let desc = TypeDesc::of::<u8>(JsonFamily::Number).with_path("demo::model::Person");
        assert_eq!(desc.name(), "Person");

        let desc = desc.with_path("alloc::vec::Vec<demo::Person>");
        assert_eq!(desc.name(), "Vec<demo::Person>");

        let desc = desc.with_path("u8");
        assert_eq!(desc.name(), "u8");
    }

    #[test]
    fn dynamic_is_universal_supertype() {
        let any = <dyn Reflect as Typed>::type_desc();
        assert!(any.is_supertype_of(<String as Typed>::type_desc()));
        assert!(any.is_supertype_of(<Vec<u8> as Typed>::type_desc()));
        assert!(!<String as Typed>::type_desc().is_supertype_of(any));
    }

    #[test]
    fn equality_uses_type_id() {
        let a = TypeDesc::of::<u8>(JsonFamily::Number);
        let b = TypeDesc::of::<u8>(JsonFamily::Text).with_path("other");
        assert_eq!(a, b);
        assert_ne!(a, TypeDesc::of::<u16>(JsonFamily::Number));
    }
}
