use core::fmt::Debug;
use std::time::SystemTime;

use crate::Number;

// -----------------------------------------------------------------------------
// NumberFormat

/// An opaque number formatting handle.
///
/// When a policy carries one, numbers are emitted as the strings it
/// produces. Every snapshot owns its handle: cloning a policy duplicates
/// the handle through [`box_clone`](NumberFormat::box_clone).
pub trait NumberFormat: Debug + Send + Sync {
    fn format(&self, number: Number) -> String;

    /// Returns an independent copy of this handle.
    fn box_clone(&self) -> Box<dyn NumberFormat>;
}

impl Clone for Box<dyn NumberFormat> {
    #[inline]
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

// -----------------------------------------------------------------------------
// DateFormat

/// An opaque date formatting handle.
///
/// Without one, dates are emitted as milliseconds since the Unix epoch.
pub trait DateFormat: Debug + Send + Sync {
    fn format(&self, time: SystemTime) -> String;

    /// Returns an independent copy of this handle.
    fn box_clone(&self) -> Box<dyn DateFormat>;
}

impl Clone for Box<dyn DateFormat> {
    #[inline]
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
