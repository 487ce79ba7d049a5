use core::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::Reflect;
use crate::access::{FieldReader, ReadAttribute};
use crate::info::{TypeDesc, Typed, Visibility};

// -----------------------------------------------------------------------------
// Modifiers

bitflags! {
    /// Declaration modifiers that exclude an attribute from implicit
    /// selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Not part of the persistent state of the object.
        const TRANSIENT = 1 << 0;
        /// Shared by all instances of the class.
        const STATIC    = 1 << 1;
        /// Generated rather than written by the author of the class.
        const SYNTHETIC = 1 << 2;
    }
}

// -----------------------------------------------------------------------------
// AttributeInfo

/// A declared attribute of a class: a named, typed member stored on every
/// instance.
#[derive(Clone)]
pub struct AttributeInfo {
    name: &'static str,
    visibility: Visibility,
    modifiers: Modifiers,
    ty: fn() -> &'static TypeDesc,
    reader: Arc<dyn ReadAttribute>,
}

impl AttributeInfo {
    /// Creates the attribute `name` of `C`, read with `get`.
    pub fn new<C: Reflect, T: Reflect + Typed>(
        name: &'static str,
        visibility: Visibility,
        get: fn(&C) -> &T,
    ) -> Self {
        Self {
            name,
            visibility,
            modifiers: Modifiers::empty(),
            ty: T::type_desc,
            reader: Arc::new(FieldReader::new(get)),
        }
    }

    /// Replaces the declaration modifiers.
    #[inline]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns the declared value type.
    #[inline]
    pub fn ty(&self) -> &'static TypeDesc {
        (self.ty)()
    }

    /// Returns the direct reader.
    #[inline]
    pub fn reader(&self) -> &Arc<dyn ReadAttribute> {
        &self.reader
    }

    /// Returns `false` for transient, static and synthetic attributes.
    #[inline]
    pub fn is_serializable(&self) -> bool {
        !self
            .modifiers
            .intersects(Modifiers::TRANSIENT | Modifiers::STATIC | Modifiers::SYNTHETIC)
    }
}

impl fmt::Debug for AttributeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("modifiers", &self.modifiers)
            .field("ty", self.ty())
            .finish_non_exhaustive()
    }
}
