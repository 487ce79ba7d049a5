//! Ordered `(name, value)` output of one mapped object.
//!
//! A projection only grows and is read in insertion order. It has no
//! lookup by name, membership test or removal.
//!
//! - [`GrowableProjection`]: used when the plan was just discovered.
//! - [`FixedProjection`]: used on a cache hit, sized once from the plan.
//! - [`ObjectProjection`]: either of them, as stored in a [`Node`](crate::Node).

// -----------------------------------------------------------------------------
// Modules

mod fixed;
mod growable;

// -----------------------------------------------------------------------------
// Exports

pub use fixed::FixedProjection;
pub use growable::GrowableProjection;

use core::fmt;
use std::sync::Arc;

use crate::Node;

// -----------------------------------------------------------------------------
// Projection

/// The operations every projection supports.
pub trait Projection {
    /// Appends an entry.
    fn push(&mut self, name: Arc<str>, value: Node);

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over entries in insertion order.
    fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)>;

    /// Removes every entry.
    fn clear(&mut self);
}

type Entry = (Arc<str>, Node);

#[inline]
fn entry_ref((name, value): &Entry) -> (&str, &Node) {
    (&**name, value)
}

// -----------------------------------------------------------------------------
// ObjectProjection

/// The projection of a mapped object.
#[derive(Clone)]
pub enum ObjectProjection {
    Growable(GrowableProjection),
    Fixed(FixedProjection),
}

impl ObjectProjection {
    /// Returns `true` if this was filled from a cached plan.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries().iter().map(entry_ref)
    }

    #[inline]
    fn entries(&self) -> &[Entry] {
        match self {
            Self::Growable(p) => p.entries(),
            Self::Fixed(p) => p.entries(),
        }
    }
}

impl Projection for ObjectProjection {
    #[inline]
    fn push(&mut self, name: Arc<str>, value: Node) {
        match self {
            Self::Growable(p) => p.push(name, value),
            Self::Fixed(p) => p.push(name, value),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        ObjectProjection::len(self)
    }

    #[inline]
    fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        ObjectProjection::iter(self)
    }

    #[inline]
    fn clear(&mut self) {
        match self {
            Self::Growable(p) => p.clear(),
            Self::Fixed(p) => p.clear(),
        }
    }
}

impl From<GrowableProjection> for ObjectProjection {
    #[inline]
    fn from(value: GrowableProjection) -> Self {
        Self::Growable(value)
    }
}

impl From<FixedProjection> for ObjectProjection {
    #[inline]
    fn from(value: FixedProjection) -> Self {
        Self::Fixed(value)
    }
}

/// Compares entries only: a growable and a fixed projection holding the
/// same entries are equal.
impl PartialEq for ObjectProjection {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl fmt::Debug for ObjectProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedProjection, GrowableProjection, ObjectProjection, Projection};
    use crate::Node;

    #[test]
    fn kinds_compare_by_entries() {
        let mut growable = GrowableProjection::new();
        growable.push("a".into(), Node::Bool(true));

        let mut fixed = FixedProjection::with_capacity(1);
        fixed.push("a".into(), Node::Bool(true));

        let growable = ObjectProjection::from(growable);
        let fixed = ObjectProjection::from(fixed);
        assert_eq!(growable, fixed);
        assert!(fixed.is_fixed() && !growable.is_fixed());
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut p = ObjectProjection::from(GrowableProjection::new());
        p.push("z".into(), Node::Null);
        p.push("a".into(), Node::Null);
        p.push("z".into(), Node::Bool(false));

        let names: Vec<&str> = p.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["z", "a", "z"]);

        p.clear();
        assert!(p.is_empty());
    }
}
