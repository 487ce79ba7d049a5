//! Reference cycle detection for one encode call.

use core::any::TypeId;
use core::ops::{Deref, DerefMut};

use crate::{MapError, Reflect};

// -----------------------------------------------------------------------------
// Identity

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Identity {
    address: usize,
    type_id: TypeId,
}

// -----------------------------------------------------------------------------
// TraversalGuard

/// The stack of containers and objects currently being encoded.
///
/// An identity is the address of a value together with its concrete type,
/// so a struct and a field stored at its start are told apart. Zero-sized
/// values have no meaningful address and are never tracked.
///
/// A guard belongs to one encode call and is not shared across threads.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::guard::TraversalGuard;
///
/// let items = vec![1, 2];
/// let mut guard = TraversalGuard::new();
///
/// let scope = guard.enter(&items).unwrap();
/// assert_eq!(scope.depth(), 1);
/// drop(scope);
///
/// assert!(guard.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct TraversalGuard {
    stack: Vec<Identity>,
}

impl TraversalGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Pushes `value`, or fails with [`MapError::CycleDetected`] if it is
    /// already on the stack.
    ///
    /// The returned scope pops the value when dropped, on every exit path.
    pub fn enter(&mut self, value: &dyn Reflect) -> Result<GuardScope<'_>, MapError> {
        if size_of_val(value) == 0 {
            return Ok(GuardScope {
                guard: self,
                tracked: false,
            });
        }

        let identity = Identity {
            address: value.address(),
            type_id: value.value_type_id(),
        };

        if self.stack.contains(&identity) {
            return Err(MapError::CycleDetected {
                type_path: value.reflect_type_desc().path(),
                address: identity.address,
            });
        }

        self.stack.push(identity);
        Ok(GuardScope {
            guard: self,
            tracked: true,
        })
    }

    /// Returns the number of values being encoded.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

// -----------------------------------------------------------------------------
// GuardScope

/// A value entered into a [`TraversalGuard`].
///
/// Derefs to the guard, so nested values are entered through the scope.
#[derive(Debug)]
pub struct GuardScope<'g> {
    guard: &'g mut TraversalGuard,
    tracked: bool,
}

impl Deref for GuardScope<'_> {
    type Target = TraversalGuard;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.guard
    }
}

impl DerefMut for GuardScope<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.guard
    }
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        if self.tracked {
            self.guard.stack.pop();
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
