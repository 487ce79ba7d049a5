use core::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::access::Upcast;
use crate::info::{AttributeInfo, MethodInfo, TypeDesc, Typed};

// -----------------------------------------------------------------------------
// Class

/// A type mapped through its reflected attributes.
///
/// Implemented with [`impl_class!`](crate::impl_class), which also provides
/// [`Typed`] and [`Reflect`].
pub trait Class: Reflect + Typed {
    /// Returns the static class description.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// ParentLink

/// The parent of a class and the way to view an instance as it.
#[derive(Clone)]
pub struct ParentLink {
    class: fn() -> &'static ClassInfo,
    upcast: Arc<dyn Upcast>,
}

impl ParentLink {
    #[inline]
    pub(crate) fn new(class: fn() -> &'static ClassInfo, upcast: Arc<dyn Upcast>) -> Self {
        Self { class, upcast }
    }

    #[inline]
    pub fn class(&self) -> &'static ClassInfo {
        (self.class)()
    }

    #[inline]
    pub fn upcast(&self) -> &Arc<dyn Upcast> {
        &self.upcast
    }
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Static description of a class.
///
/// Holds the declared attributes and methods in declaration order, the
/// parent link, and an optional text rendering used in error messages and
/// when objects are not reflected.
///
/// Built with [`ClassBuilder`](crate::info::ClassBuilder).
pub struct ClassInfo {
    pub(super) ty: TypeDesc,
    pub(super) parent: Option<ParentLink>,
    pub(super) attributes: Box<[AttributeInfo]>,
    pub(super) methods: Box<[MethodInfo]>,
    pub(super) render: Option<fn(&dyn Reflect) -> Option<String>>,
}

impl ClassInfo {
    /// Returns the type descriptor of the class.
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub fn id(&self) -> core::any::TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn parent(&self) -> Option<&'static ClassInfo> {
        self.parent.as_ref().map(ParentLink::class)
    }

    #[inline]
    pub fn parent_link(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    /// Iterates over this class and its ancestors, most derived first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static ClassInfo> {
        core::iter::successors(Some(self), |class| class.parent())
    }

    /// Returns the attributes declared on this class, not inherited ones.
    #[inline]
    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    /// Returns the methods declared on this class, not inherited ones.
    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|method| method.name() == name)
    }

    /// Renders `object` with the text rendering of the class, if it has one.
    #[inline]
    pub fn render(&self, object: &dyn Reflect) -> Option<String> {
        self.render.and_then(|render| render(object))
    }

    /// Describes `object` for diagnostics: its rendering, or the class
    /// name and the address.
    pub fn describe(&self, object: &dyn Reflect) -> String {
        self.render(object)
            .unwrap_or_else(|| format!("{}@{:#x}", self.name(), object.address()))
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("ty", &self.ty)
            .field("parent", &self.parent().map(ClassInfo::type_path))
            .field("attributes", &self.attributes)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}
