//! Static type and class descriptions.
//!
//! - [`TypeDesc`] / [`Typed`]: identity, path, [`JsonFamily`] and parent of a type.
//! - [`ClassInfo`] / [`Class`]: declared attributes and methods of a class.
//! - [`ClassBuilder`] and [`impl_class!`](crate::impl_class): the way classes
//!   register themselves.

// -----------------------------------------------------------------------------
// Modules

mod attribute;
mod builder;
mod class_info;
mod family;
mod method;
mod type_desc;
mod visibility;

// -----------------------------------------------------------------------------
// Exports

pub use attribute::{AttributeInfo, Modifiers};
pub use builder::ClassBuilder;
pub use class_info::{Class, ClassInfo, ParentLink};
pub use family::JsonFamily;
pub use method::{MethodInfo, property_name};
pub use type_desc::{DynamicTyped, TypeDesc, Typed};
pub use visibility::Visibility;
