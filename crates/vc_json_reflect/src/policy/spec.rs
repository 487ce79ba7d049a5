use vc_utils::hash::HashMap;

use crate::info::{TypeDesc, Typed};

// -----------------------------------------------------------------------------
// ClassReflectSpec

/// Per-class selection rules: which attributes to expose and under which
/// names.
///
/// - `explicit`: a set of attribute names. When present, exactly these
///   attributes are mapped regardless of privacy, and each one must
///   resolve. They are emitted in declaration order, not in the order given
///   here.
/// - `aliases`: output names keyed by declared name.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::policy::ClassReflectSpec;
///
/// let spec = ClassReflectSpec::of::<String>()
///     .with_explicit(["b", "a", "b"])
///     .with_alias("a", "alpha");
///
/// let names: Vec<&str> = spec.explicit().unwrap().iter().map(|n| &**n).collect();
/// assert_eq!(names, ["b", "a"]);
/// assert_eq!(spec.output_name("a"), "alpha");
/// assert_eq!(spec.output_name("b"), "b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReflectSpec {
    target: &'static TypeDesc,
    explicit: Option<Vec<Box<str>>>,
    aliases: Option<HashMap<Box<str>, Box<str>>>,
}

impl ClassReflectSpec {
    /// Creates a spec without explicit names or aliases.
    #[inline]
    pub const fn new(target: &'static TypeDesc) -> Self {
        Self {
            target,
            explicit: None,
            aliases: None,
        }
    }

    /// Creates an empty spec for `C`.
    #[inline]
    pub fn of<C: Typed + ?Sized>() -> Self {
        Self::new(C::type_desc())
    }

    /// Sets the explicit names; see [`set_explicit`](Self::set_explicit).
    pub fn with_explicit<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Box<str>>,
    {
        self.set_explicit(names);
        self
    }

    /// Adds an alias; see [`insert_alias`](Self::insert_alias).
    pub fn with_alias(mut self, declared: impl Into<Box<str>>, output: impl Into<Box<str>>) -> Self {
        self.insert_alias(declared, output);
        self
    }

    #[inline]
    pub fn target(&self) -> &'static TypeDesc {
        self.target
    }

    /// Returns the explicit names in supplied order, without duplicates.
    #[inline]
    pub fn explicit(&self) -> Option<&[Box<str>]> {
        self.explicit.as_deref()
    }

    #[inline]
    pub fn has_explicit(&self) -> bool {
        self.explicit.is_some()
    }

    /// Replaces the explicit names.
    ///
    /// Later duplicates are dropped, so the first occurrence decides the
    /// position of a name.
    pub fn set_explicit<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Box<str>>,
    {
        let mut ordered: Vec<Box<str>> = Vec::new();
        for name in names {
            let name = name.into();
            if !ordered.contains(&name) {
                ordered.push(name);
            }
        }
        self.explicit = Some(ordered);
    }

    /// Removes the explicit names, returning to implicit selection.
    #[inline]
    pub fn clear_explicit(&mut self) {
        self.explicit = None;
    }

    #[inline]
    pub fn aliases(&self) -> Option<&HashMap<Box<str>, Box<str>>> {
        self.aliases.as_ref()
    }

    /// Maps `declared` to `output`, returning the previous alias.
    pub fn insert_alias(
        &mut self,
        declared: impl Into<Box<str>>,
        output: impl Into<Box<str>>,
    ) -> Option<Box<str>> {
        self.aliases
            .get_or_insert_with(HashMap::default)
            .insert(declared.into(), output.into())
    }

    pub fn remove_alias(&mut self, declared: &str) -> Option<Box<str>> {
        let aliases = self.aliases.as_mut()?;
        let removed = aliases.remove(declared);
        if aliases.is_empty() {
            self.aliases = None;
        }
        removed
    }

    /// Returns the alias of `declared`, if any.
    #[inline]
    pub fn alias(&self, declared: &str) -> Option<&str> {
        self.aliases.as_ref()?.get(declared).map(|output| &**output)
    }

    /// Returns the name `declared` is emitted under.
    #[inline]
    pub fn output_name<'a>(&'a self, declared: &'a str) -> &'a str {
        self.alias(declared).unwrap_or(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::ClassReflectSpec;

    #[test]
    fn removing_last_alias_clears_map() {
        let mut spec = ClassReflectSpec::of::<u8>().with_alias("a", "b");
        assert_eq!(spec.remove_alias("a").as_deref(), Some("b"));
        assert!(spec.aliases().is_none());
        assert_eq!(spec.remove_alias("a"), None);
    }

    #[test]
    fn explicit_set_can_be_cleared() {
        let mut spec = ClassReflectSpec::of::<u8>().with_explicit(["x"]);
        assert!(spec.has_explicit());
        spec.clear_explicit();
        assert!(spec.explicit().is_none());
    }
}
