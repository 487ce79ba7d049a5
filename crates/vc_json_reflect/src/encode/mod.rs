//! Mapping of values to [`Node`](crate::Node) trees.

mod encoder;

pub use encoder::Encoder;
