use serde_core::ser::SerializeSeq;
use serde_core::{Serialize, Serializer};

use super::EmitDriver;

use crate::Node;
use crate::policy::EncodingPolicy;

/// A serializer for [`Node::Array`] items.
pub(super) struct ArraySerializer<'a> {
    pub items: &'a [Node],
    pub policy: &'a EncodingPolicy,
}

impl Serialize for ArraySerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.items.len()))?;
        for item in self.items {
            state.serialize_element(&EmitDriver::new(item, self.policy))?;
        }
        state.end()
    }
}
