//! Type-erased readers behind declared attributes and accessors.
//!
//! [`ClassBuilder`](crate::info::ClassBuilder) turns typed function pointers
//! into the structs of this module and stores them as trait objects, so a
//! [`ClassInfo`](crate::info::ClassInfo) needs no generic parameters.

use core::fmt;
use core::ops::Deref;

use thiserror::Error;

use crate::{BoxError, Reflect};

// -----------------------------------------------------------------------------
// Fetched

/// A value read from an object: borrowed from it, or produced by a getter.
pub enum Fetched<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl Deref for Fetched<'_> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl fmt::Debug for Fetched<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(value) => f.debug_tuple("Borrowed").field(value).finish(),
            Self::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// ReceiverMismatch

/// An accessor was invoked on an object of another class.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected a receiver of type `{expected}`, found `{found}`")]
pub struct ReceiverMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

#[inline]
fn receiver<C: Reflect>(object: &dyn Reflect) -> Result<&C, ReceiverMismatch> {
    object.downcast_ref::<C>().ok_or_else(|| ReceiverMismatch {
        expected: core::any::type_name::<C>(),
        found: object.reflect_type_desc().path(),
    })
}

// -----------------------------------------------------------------------------
// Traits

/// Direct read of a declared attribute.
pub trait ReadAttribute: Send + Sync {
    fn read<'a>(&self, object: &'a dyn Reflect) -> Result<&'a dyn Reflect, BoxError>;
}

/// Invocation of a zero-argument accessor.
pub trait InvokeAccessor: Send + Sync {
    fn invoke<'a>(&self, object: &'a dyn Reflect) -> Result<Fetched<'a>, BoxError>;
}

/// View of an object as its parent class.
pub trait Upcast: Send + Sync {
    fn upcast<'a>(&self, object: &'a dyn Reflect) -> Result<&'a dyn Reflect, BoxError>;
}

// -----------------------------------------------------------------------------
// FieldReader

/// Reads a `T` stored in a `C`.
pub struct FieldReader<C, T> {
    get: fn(&C) -> &T,
}

impl<C: Reflect, T: Reflect> FieldReader<C, T> {
    #[inline]
    pub const fn new(get: fn(&C) -> &T) -> Self {
        Self { get }
    }
}

impl<C: Reflect, T: Reflect> ReadAttribute for FieldReader<C, T> {
    fn read<'a>(&self, object: &'a dyn Reflect) -> Result<&'a dyn Reflect, BoxError> {
        let object = receiver::<C>(object)?;
        Ok((self.get)(object))
    }
}

// -----------------------------------------------------------------------------
// MethodInvoker

/// Calls a getter of `C` that produces an owned `T` or fails.
pub struct MethodInvoker<C, T> {
    call: fn(&C) -> Result<T, BoxError>,
}

impl<C: Reflect, T: Reflect> MethodInvoker<C, T> {
    #[inline]
    pub const fn new(call: fn(&C) -> Result<T, BoxError>) -> Self {
        Self { call }
    }
}

impl<C: Reflect, T: Reflect> InvokeAccessor for MethodInvoker<C, T> {
    fn invoke<'a>(&self, object: &'a dyn Reflect) -> Result<Fetched<'a>, BoxError> {
        let object = receiver::<C>(object)?;
        let value = (self.call)(object)?;
        Ok(Fetched::Owned(Box::new(value)))
    }
}

// -----------------------------------------------------------------------------
// BorrowingInvoker

/// Calls a getter of `C` that returns a reference into the object.
pub struct BorrowingInvoker<C, T> {
    call: fn(&C) -> &T,
}

impl<C: Reflect, T: Reflect> BorrowingInvoker<C, T> {
    #[inline]
    pub const fn new(call: fn(&C) -> &T) -> Self {
        Self { call }
    }
}

impl<C: Reflect, T: Reflect> InvokeAccessor for BorrowingInvoker<C, T> {
    fn invoke<'a>(&self, object: &'a dyn Reflect) -> Result<Fetched<'a>, BoxError> {
        let object = receiver::<C>(object)?;
        Ok(Fetched::Borrowed((self.call)(object)))
    }
}

// -----------------------------------------------------------------------------
// ParentUpcast

/// Projects a `C` onto its embedded parent `P`.
pub struct ParentUpcast<C, P> {
    get: fn(&C) -> &P,
}

impl<C: Reflect, P: Reflect> ParentUpcast<C, P> {
    #[inline]
    pub const fn new(get: fn(&C) -> &P) -> Self {
        Self { get }
    }
}

impl<C: Reflect, P: Reflect> Upcast for ParentUpcast<C, P> {
    fn upcast<'a>(&self, object: &'a dyn Reflect) -> Result<&'a dyn Reflect, BoxError> {
        let object = receiver::<C>(object)?;
        Ok((self.get)(object))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FieldReader, InvokeAccessor, MethodInvoker, ReadAttribute};
    use crate::{BoxError, Reflect};

    fn double(value: &u32) -> Result<u64, BoxError> {
        Ok(u64::from(*value) * 2)
    }

    #[test]
    fn method_invoker_boxes_result() {
        let invoker = MethodInvoker::<u32, u64>::new(double);
        let fetched = invoker.invoke(&21_u32).unwrap();
        assert_eq!(fetched.downcast_ref::<u64>(), Some(&42));
    }

    #[test]
    fn wrong_receiver_is_reported() {
        let reader = FieldReader::<u32, u32>::new(|v| v);
        let object: &dyn Reflect = &String::new();
        let err = reader.read(object).unwrap_err();
        assert!(err.to_string().contains("u32"));
    }
}
