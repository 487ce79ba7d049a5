use core::fmt;

// -----------------------------------------------------------------------------
// JsonFamily

/// Coarse classification of a type by the JSON value it produces.
///
/// Two types in the same [interchangeable](JsonFamily::is_interchangeable)
/// family emit the same kind of JSON value, which is what the
/// getter/field compatibility test falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonFamily {
    /// `()`, emitted as `null`.
    Null,
    Boolean,
    Number,
    Text,
    /// Points in time, emitted through a date formatter.
    Temporal,
    /// Lists, arrays and sets.
    Sequence,
    /// String keyed maps.
    Associative,
    /// Classes mapped through reflection.
    Object,
    /// `dyn Reflect`: any value, known only at runtime.
    Dynamic,
}

impl JsonFamily {
    /// Returns `true` for the families whose members may stand in for each
    /// other: number, text, boolean, sequence and associative.
    #[inline]
    pub const fn is_interchangeable(self) -> bool {
        matches!(
            self,
            Self::Number | Self::Text | Self::Boolean | Self::Sequence | Self::Associative
        )
    }
}

impl fmt::Display for JsonFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.pad("Null"),
            Self::Boolean => f.pad("Boolean"),
            Self::Number => f.pad("Number"),
            Self::Text => f.pad("Text"),
            Self::Temporal => f.pad("Temporal"),
            Self::Sequence => f.pad("Sequence"),
            Self::Associative => f.pad("Associative"),
            Self::Object => f.pad("Object"),
            Self::Dynamic => f.pad("Dynamic"),
        }
    }
}
