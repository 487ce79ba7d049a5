use core::fmt;
use std::sync::Arc;

use crate::access::{Fetched, InvokeAccessor, ReadAttribute, Upcast};
use crate::info::ClassInfo;
use crate::{BoxError, Reflect};

// -----------------------------------------------------------------------------
// Accessor

/// How a planned attribute is read.
#[derive(Clone)]
pub enum AccessorKind {
    /// Through a getter.
    Method(Arc<dyn InvokeAccessor>),
    /// Directly from the declared attribute.
    Field(Arc<dyn ReadAttribute>),
}

/// A resolved read of one attribute.
///
/// Inherited members are declared on an ancestor class, so the object is
/// first viewed as that ancestor through the `via` chain.
#[derive(Clone)]
pub struct Accessor {
    source: &'static str,
    kind: AccessorKind,
    via: Arc<[Arc<dyn Upcast>]>,
}

impl Accessor {
    #[inline]
    pub(crate) fn new(source: &'static str, kind: AccessorKind, via: Arc<[Arc<dyn Upcast>]>) -> Self {
        Self { source, kind, via }
    }

    /// Returns the name of the method or attribute this reads.
    #[inline]
    pub fn source(&self) -> &'static str {
        self.source
    }

    #[inline]
    pub fn kind(&self) -> &AccessorKind {
        &self.kind
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self.kind, AccessorKind::Method(_))
    }

    /// Returns the number of parent hops before the read.
    #[inline]
    pub fn depth(&self) -> usize {
        self.via.len()
    }

    /// Reads the attribute from `object`.
    pub fn read<'a>(&self, object: &'a dyn Reflect) -> Result<Fetched<'a>, BoxError> {
        let mut target = object;
        for step in self.via.iter() {
            target = step.upcast(target)?;
        }
        match &self.kind {
            AccessorKind::Method(invoker) => invoker.invoke(target),
            AccessorKind::Field(reader) => reader.read(target).map(Fetched::Borrowed),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            AccessorKind::Method(_) => "Method",
            AccessorKind::Field(_) => "Field",
        };
        f.debug_struct("Accessor")
            .field("source", &self.source)
            .field("kind", &kind)
            .field("depth", &self.via.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// AttributePlan

/// The discovered mapping of one class under one policy: output names and
/// the parallel accessors, in output order.
///
/// Frozen once built. The cache hands out `Arc<AttributePlan>`, so readers
/// always observe a complete plan.
#[derive(Debug)]
pub struct AttributePlan {
    class: &'static ClassInfo,
    names: Box<[Arc<str>]>,
    accessors: Box<[Accessor]>,
}

impl AttributePlan {
    /// Creates a plan from parallel name and accessor lists.
    ///
    /// # Panics
    ///
    /// Panics if the lists have different lengths.
    pub fn new(class: &'static ClassInfo, names: Vec<Arc<str>>, accessors: Vec<Accessor>) -> Self {
        assert_eq!(
            names.len(),
            accessors.len(),
            "plan of `{}` needs one accessor per name",
            class.type_path(),
        );
        Self {
            class,
            names: names.into_boxed_slice(),
            accessors: accessors.into_boxed_slice(),
        }
    }

    /// Creates a plan from `(name, accessor)` entries.
    pub fn from_entries(class: &'static ClassInfo, entries: Vec<(Arc<str>, Accessor)>) -> Self {
        let (names, accessors) = entries.into_iter().unzip();
        Self::new(class, names, accessors)
    }

    #[inline]
    pub fn class(&self) -> &'static ClassInfo {
        self.class
    }

    #[inline]
    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    #[inline]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` if there is exactly one accessor per name.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.names.len() == self.accessors.len()
    }

    /// Iterates over `(name, accessor)` pairs in output order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Arc<str>, &Accessor)> {
        self.names.iter().zip(self.accessors.iter())
    }
}

// -----------------------------------------------------------------------------
// Tests
