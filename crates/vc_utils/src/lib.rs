//! Shared containers for the `vc_json` workspace.
//!
//! - [`hash`]: fixed-seed hashing and `hashbrown` based maps.
//! - [`collections`]: concurrent containers.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod collections;
pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
