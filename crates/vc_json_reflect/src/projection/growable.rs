use std::sync::Arc;

use crate::Node;
use crate::projection::{Entry, Projection, entry_ref};

/// A projection backed by a growable list.
#[derive(Debug, Clone, Default)]
pub struct GrowableProjection {
    entries: Vec<Entry>,
}

impl GrowableProjection {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(super) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl Projection for GrowableProjection {
    #[inline]
    fn push(&mut self, name: Arc<str>, value: Node) {
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
