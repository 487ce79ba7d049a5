//! [`Reflect`] and [`Typed`] for std types, and the descriptor cells used to
//! implement them.
//!
//! ## Implemented Menu
//!
//! - terminals:
//!     - `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`, `f64`
//!     - `bool`, `char`, `()`
//!     - `&'static str`, `String`
//!     - `std::time::SystemTime`
//! - wrappers:
//!     - `Option<T>`, `OnceLock<T>`
//!     - `Box<T>`, `Arc<T>` (transparent, also for `dyn Reflect`)
//! - sequences:
//!     - `[T; N]`, `Vec<T>`, `VecDeque<T>`
//!     - `BTreeSet<T>`, `HashSet<T, S>`
//! - associatives:
//!     - `BTreeMap<String, V>`, `HashMap<String, V, S>`
//!
//! [`Reflect`]: crate::Reflect
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod utils;

mod associative;
mod native;
mod sequence;
mod time;
mod wrapper;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeDescCell, NonGenericCell, NonGenericClassCell, NonGenericTypeDescCell};
