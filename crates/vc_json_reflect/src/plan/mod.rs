//! Attribute discovery and the plan cache.
//!
//! [`discover`] decides, for one class under one policy, which attributes
//! are mapped and how each one is read. The result is an immutable
//! [`AttributePlan`], memoized in a [`PlanCache`] under a [`PlanKey`].

// -----------------------------------------------------------------------------
// Modules

mod attribute_plan;
mod cache;
mod compat;
mod discover;
mod key;

// -----------------------------------------------------------------------------
// Exports

pub use attribute_plan::{Accessor, AccessorKind, AttributePlan};
pub use cache::{CacheStats, PlanCache};
pub use compat::is_compatible;
pub use discover::discover;
pub use key::PlanKey;
