use std::sync::Arc;

use crate::Node;
use crate::plan::AttributePlan;
use crate::projection::{Entry, Projection, entry_ref};

/// A projection with a capacity fixed at creation.
///
/// Sized from an [`AttributePlan`] on a cache hit, when the number of
/// entries is known up front. It never reallocates.
#[derive(Debug, Clone)]
pub struct FixedProjection {
    entries: Vec<Entry>,
    capacity: usize,
}

impl FixedProjection {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates a projection with one slot per attribute of `plan`.
    #[inline]
    pub fn for_plan(plan: &AttributePlan) -> Self {
        Self::with_capacity(plan.len())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    #[inline]
    pub(super) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Projection for FixedProjection {
    /// # Panics
    ///
    /// Panics if every slot is already filled.
    #[inline]
    fn push(&mut self, name: Arc<str>, value: Node) {
        assert!(
            !self.is_full(),
            "fixed projection overflow: capacity is {}",
            self.capacity
        );
        self.entries.push((name, value));
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries.iter().map(entry_ref)
    }

    #[inline]
    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::FixedProjection;
    use crate::Node;
    use crate::projection::Projection;

    #[test]
    #[should_panic(expected = "fixed projection overflow")]
    fn overflow_panics() {
        let mut p = FixedProjection::with_capacity(1);
        p.push("a".into(), Node::Null);
        assert!(p.is_full());
        p.push("b".into(), Node::Null);
    }
}
