use serde_core::ser::SerializeMap;
use serde_core::{Serialize, Serializer};

use super::EmitDriver;

use crate::policy::EncodingPolicy;
use crate::projection::ObjectProjection;

/// A serializer for [`Node::Object`](crate::Node::Object) entries, in
/// projection order.
pub(super) struct ObjectSerializer<'a> {
    pub object: &'a ObjectProjection,
    pub policy: &'a EncodingPolicy,
}

impl Serialize for ObjectSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.object.len()))?;
        for (name, value) in self.object.iter() {
            state.serialize_entry(name, &EmitDriver::new(value, self.policy))?;
        }
        state.end()
    }
}
