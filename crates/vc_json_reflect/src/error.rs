use thiserror::Error;

/// The error type accessors return, and the cause carried by
/// [`MapError::AccessorInvocation`].
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

// -----------------------------------------------------------------------------
// UnresolvedAttribute

/// An explicitly requested attribute that discovery could not resolve.
///
/// Returned by [`discover`](crate::plan::discover), which works on classes
/// rather than objects. The encoder promotes it to
/// [`MapError::UnresolvedExplicitAttribute`] with the object attached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("attribute `{attribute}` is neither declared on `{class}` nor readable through an accessor")]
pub struct UnresolvedAttribute {
    pub class: &'static str,
    pub attribute: Box<str>,
}

impl UnresolvedAttribute {
    /// Attaches the description of the object being mapped.
    #[inline]
    pub fn promote(self, object: String) -> MapError {
        MapError::UnresolvedExplicitAttribute {
            object,
            class: self.class,
            attribute: self.attribute,
        }
    }
}

// -----------------------------------------------------------------------------
// MapError

/// Errors raised while mapping a value to a [`Node`](crate::Node).
///
/// None of them is retried; they propagate to the caller of
/// [`Encoder::encode`](crate::encode::Encoder::encode).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    #[error("cannot map {object}: explicit attribute `{attribute}` does not resolve on class `{class}`")]
    UnresolvedExplicitAttribute {
        object: String,
        class: &'static str,
        attribute: Box<str>,
    },

    #[error("accessor `{accessor}` of class `{class}` failed on {object}")]
    AccessorInvocation {
        object: String,
        class: &'static str,
        accessor: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("reference cycle detected: `{type_path}` at {address:#x} is already being encoded")]
    CycleDetected {
        type_path: &'static str,
        address: usize,
    },

    #[error("cached plan for class `{class}` is inconsistent: {names} names for {accessors} accessors")]
    CachePoisoning {
        class: &'static str,
        names: usize,
        accessors: usize,
    },
}

impl MapError {
    /// Returns `true` for [`MapError::CycleDetected`].
    #[inline]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{MapError, UnresolvedAttribute};
    use core::error::Error;

    #[test]
    fn promote_keeps_class_and_attribute() {
        let err = UnresolvedAttribute {
            class: "demo::Person",
            attribute: "nickname".into(),
        }
        .promote("Person@0x10".to_owned());

        let text = err.to_string();
        assert!(text.contains("Person@0x10"));
        assert!(text.contains("demo::Person"));
        assert!(text.contains("nickname"));
    }

    #[test]
    fn accessor_failure_keeps_cause() {
        let err = MapError::AccessorInvocation {
            object: "Person@0x10".to_owned(),
            class: "demo::Person",
            accessor: "getAge",
            source: "age unknown".into(),
        };

        assert_eq!(err.source().unwrap().to_string(), "age unknown");
        assert!(!err.is_cycle());
    }
}
