use core::fmt;
use std::time::SystemTime;

use crate::projection::ObjectProjection;

// -----------------------------------------------------------------------------
// Number

/// A JSON number, kept in the widest Rust representation of its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signed(v) => fmt::Display::fmt(v, f),
            Self::Unsigned(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Node

/// The ordered, acyclic JSON model produced by the encoder.
///
/// Numbers and dates stay unformatted here; formatting is applied on
/// emission, see [`EmitDriver`](crate::serde::EmitDriver).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Date(SystemTime),
    Array(Vec<Node>),
    Object(ObjectProjection),
}

impl Node {
    /// Returns `true` for [`Node::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the projection of an object node.
    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectProjection> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the items of an array node.
    #[inline]
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the content of a text node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the value of a number node.
    #[inline]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }
}
