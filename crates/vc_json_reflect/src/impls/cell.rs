//! Containers for static storage of descriptors.
//!
//! ## NonGenericCell
//!
//! For non generic types, [`NonGenericTypeDescCell`] stores a [`TypeDesc`]
//! and [`NonGenericClassCell`] stores a [`ClassInfo`]. Internally there is
//! an [`OnceLock<T>`].
//!
//! ## GenericTypeDescCell
//!
//! A `static CELL` inside a generic function is shared by every
//! instantiation, so [`GenericTypeDescCell`] keeps one descriptor per
//! [`TypeId`] in a [`TypeIdMap`] wrapped in [`RwLock`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::info::{ClassInfo, TypeDesc};

mod sealed {
    use crate::info::{ClassInfo, TypeDesc};

    pub trait StaticDescriptor: 'static {}

    impl StaticDescriptor for TypeDesc {}
    impl StaticDescriptor for ClassInfo {}
}

use sealed::StaticDescriptor;

// -----------------------------------------------------------------------------
// NonGenericCell

/// Container for static storage of a non-generic descriptor.
///
/// See [`NonGenericTypeDescCell`] and [`NonGenericClassCell`].
pub struct NonGenericCell<T: StaticDescriptor>(OnceLock<T>);

/// Static storage of the [`TypeDesc`] of a non-generic type.
///
/// ## Example
///
/// ```
/// use vc_json_reflect::impls::NonGenericTypeDescCell;
/// use vc_json_reflect::info::{JsonFamily, TypeDesc, Typed};
///
/// struct Meters(f64);
///
/// impl Typed for Meters {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: NonGenericTypeDescCell = NonGenericTypeDescCell::new();
///         CELL.get_or_init(|| TypeDesc::of::<Meters>(JsonFamily::Number))
///     }
/// }
///
/// assert_eq!(Meters::type_desc().name(), "Meters");
/// ```
pub type NonGenericTypeDescCell = NonGenericCell<TypeDesc>;

/// Static storage of the [`ClassInfo`] of a class.
///
/// Used by [`impl_class!`](crate::impl_class).
pub type NonGenericClassCell = NonGenericCell<ClassInfo>;

impl<T: StaticDescriptor> NonGenericCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, initializing it with `f` first if
    /// the cell is empty.
    ///
    /// `f` must not ask for the descriptor being built.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeDescCell

/// Static storage of [`TypeDesc`]s for generic types.
///
/// ## Example
///
/// ```
/// use vc_json_reflect::impls::GenericTypeDescCell;
/// use vc_json_reflect::info::{JsonFamily, TypeDesc, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: Typed> Typed for Tagged<T> {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: GenericTypeDescCell = GenericTypeDescCell::new();
///         CELL.get_or_insert::<Self>(|| TypeDesc::of::<Self>(T::type_desc().family()))
///     }
/// }
///
/// assert_eq!(<Tagged<u8>>::type_desc().family(), JsonFamily::Number);
/// assert_eq!(<Tagged<String>>::type_desc().family(), JsonFamily::Text);
/// ```
pub struct GenericTypeDescCell(RwLock<TypeIdMap<&'static TypeDesc>>);

impl GenericTypeDescCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`.
    ///
    /// If there is no entry, a new one is generated from `f`. `f` runs
    /// without holding the lock, so it may ask for other descriptors
    /// stored in this cell.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeDesc) -> &'static TypeDesc {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeDesc,
    ) -> &'static TypeDesc {
        match self.get_by_type_id(type_id) {
            Some(desc) => desc,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeDesc> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // A racing initializer may lose; its descriptor is then leaked unused.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeDesc) -> &'static TypeDesc {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericTypeDescCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
