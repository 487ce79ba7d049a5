//! Encoding policy snapshots and their defaults.
//!
//! - [`EncodingPolicy`]: the settings one encode call runs with.
//! - [`PolicyDefaults`]: where snapshots are derived from.
//! - [`ClassReflectSpec`]: per-class explicit names and aliases.
//! - [`NumberFormat`] / [`DateFormat`]: opaque formatter handles.

// -----------------------------------------------------------------------------
// Modules

mod defaults;
mod format;
mod snapshot;
mod spec;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use defaults::DefaultSpec;
pub use defaults::PolicyDefaults;
pub use format::{DateFormat, NumberFormat};
pub use snapshot::EncodingPolicy;
pub use spec::ClassReflectSpec;
