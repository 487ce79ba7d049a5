//! Emission of [`Node`](crate::Node) trees through `serde`.

mod array_serializer;
mod driver;
mod object_serializer;

pub use driver::{EmitDriver, epoch_millis};
