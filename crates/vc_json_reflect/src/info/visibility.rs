use core::fmt;

// -----------------------------------------------------------------------------
// Visibility

/// Ordered visibility rank of a declared attribute or method.
///
/// Used both as the rank of a member and as the privacy threshold of an
/// [`EncodingPolicy`](crate::policy::EncodingPolicy): a member is eligible
/// when its rank is at least the threshold, so a lower threshold includes
/// more members.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::info::Visibility;
///
/// assert!(Visibility::Public.passes(Visibility::Protected));
/// assert!(!Visibility::Private.passes(Visibility::PackagePrivate));
/// assert!(Visibility::Private.passes(Visibility::MOST_PERMISSIVE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Visibility {
    Private,
    PackagePrivate,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    /// The threshold that admits every member.
    pub const MOST_PERMISSIVE: Self = Self::Private;

    /// Returns `true` if a member of this rank is visible at `threshold`.
    #[inline]
    pub fn passes(self, threshold: Visibility) -> bool {
        self >= threshold
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => f.pad("private"),
            Self::PackagePrivate => f.pad("package-private"),
            Self::Protected => f.pad("protected"),
            Self::Public => f.pad("public"),
        }
    }
}
