#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_json_reflect as reflect;
pub use vc_utils as utils;

pub use vc_json_reflect::{MapError, Node, Reflect, impl_class};
pub use vc_json_reflect::encode::Encoder;
pub use vc_json_reflect::policy::{EncodingPolicy, PolicyDefaults};
pub use vc_json_reflect::serde::EmitDriver;

/// Maps `value` under `policy` and writes it as a JSON string.
///
/// Uses the process-wide plan cache.
///
/// # Errors
///
/// Returns the [`MapError`] raised by mapping, boxed together with any
/// `serde_json` failure.
pub fn to_json_string(
    value: &dyn Reflect,
    policy: &EncodingPolicy,
) -> Result<String, reflect::BoxError> {
    let node = Encoder::new(policy).encode(value)?;
    Ok(serde_json::to_string(&EmitDriver::new(&node, policy))?)
}
