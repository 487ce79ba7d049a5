//! Policy driven object-to-JSON-model mapping.
//!
//! Values describe themselves through [`Reflect`]. Terminals and built-in
//! containers map directly; class objects (see [`info::Class`]) go through
//! the reflective attribute mapper:
//!
//! 1. the class's [`ClassReflectSpec`](policy::ClassReflectSpec) is resolved
//!    from the [`EncodingPolicy`](policy::EncodingPolicy),
//! 2. an [`AttributePlan`](plan::AttributePlan) is looked up in the
//!    [`PlanCache`](plan::PlanCache), or [discovered](plan::discover) and stored,
//! 3. every accessor of the plan is read in order into a
//!    [projection](projection), descending into nested values under a
//!    [`TraversalGuard`](guard::TraversalGuard).
//!
//! The resulting [`Node`] tree is emitted with any `serde` serializer
//! through [`EmitDriver`](serde::EmitDriver).
//!
//! # Example
//!
//! ```
//! use vc_json_reflect::{impl_class, encode::Encoder, info::Visibility};
//! use vc_json_reflect::policy::EncodingPolicy;
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl_class!(Point, |class| class
//!     .field::<i32>("x", Visibility::Public, |p| &p.x)
//!     .field::<i32>("y", Visibility::Public, |p| &p.y));
//!
//! let policy = EncodingPolicy::new();
//! let node = Encoder::new(&policy).encode(&Point { x: 1, y: 2 }).unwrap();
//!
//! let object = node.as_object().unwrap();
//! let names: Vec<&str> = object.iter().map(|(name, _)| name).collect();
//! assert_eq!(names, ["x", "y"]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    /// Expands the body when cached plans are checked on every lookup.
    macro_rules! debug {
        ($($body:tt)*) => {
            #[cfg(all(debug_assertions, feature = "debug"))]
            { $($body)* }
        };
    }

    pub(crate) use debug;
}

// -----------------------------------------------------------------------------
// Modules

mod error;
mod node;
mod reflection;

pub mod access;
pub mod encode;
pub mod guard;
pub mod impls;
pub mod info;
pub mod plan;
pub mod policy;
pub mod projection;
pub mod serde;

#[cfg(test)]
pub(crate) mod fixtures;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{BoxError, MapError, UnresolvedAttribute};
pub use node::{Node, Number};
pub use reflection::{Associative, Reflect, ReflectRef, Sequence};
