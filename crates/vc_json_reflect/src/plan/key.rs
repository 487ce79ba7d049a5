use core::any::TypeId;

use crate::info::Visibility;
use crate::policy::ClassReflectSpec;

// -----------------------------------------------------------------------------
// PlanKey

/// Identity of a discovered plan in the [`PlanCache`](crate::plan::PlanCache).
///
/// Made of the class, the privacy threshold, the explicit name set and the
/// alias map. Names and aliases are kept sorted, so two specs that hold the
/// same names or aliases in a different order produce equal keys with equal
/// hashes.
///
/// An explicit name set makes discovery ignore the threshold, so the
/// threshold of such keys is normalized to [`Visibility::MOST_PERMISSIVE`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_json_reflect::info::Visibility;
/// use vc_json_reflect::plan::PlanKey;
/// use vc_json_reflect::policy::ClassReflectSpec;
///
/// let a = ClassReflectSpec::of::<String>().with_alias("x", "1").with_alias("y", "2");
/// let b = ClassReflectSpec::of::<String>().with_alias("y", "2").with_alias("x", "1");
///
/// let id = TypeId::of::<String>();
/// assert_eq!(
///     PlanKey::new(id, &a, Visibility::Public),
///     PlanKey::new(id, &b, Visibility::Public),
/// );
/// assert_ne!(
///     PlanKey::new(id, &a, Visibility::Public),
///     PlanKey::new(id, &a, Visibility::Private),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    class: TypeId,
    privacy: Visibility,
    explicit: Option<Box<[Box<str>]>>,
    aliases: Option<Box<[(Box<str>, Box<str>)]>>,
}

impl PlanKey {
    pub fn new(class: TypeId, spec: &ClassReflectSpec, threshold: Visibility) -> Self {
        let explicit = spec.explicit().map(|names| {
            let mut names = names.to_vec();
            names.sort_unstable();
            names.into_boxed_slice()
        });

        let aliases = spec.aliases().filter(|map| !map.is_empty()).map(|map| {
            let mut pairs: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            pairs.sort_unstable();
            pairs.into_boxed_slice()
        });

        let privacy = if explicit.is_some() {
            Visibility::MOST_PERMISSIVE
        } else {
            threshold
        };

        Self {
            class,
            privacy,
            explicit,
            aliases,
        }
    }

    #[inline]
    pub fn class(&self) -> TypeId {
        self.class
    }

    #[inline]
    pub fn privacy(&self) -> Visibility {
        self.privacy
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::hash::BuildHasher;

    use vc_utils::hash::FixedHashState;

    use super::PlanKey;
    use crate::info::Visibility;
    use crate::policy::ClassReflectSpec;

    #[test]
    fn explicit_names_compare_as_set() {
        let id = TypeId::of::<String>();
        let a = ClassReflectSpec::of::<String>().with_explicit(["b", "a"]);
        let b = ClassReflectSpec::of::<String>().with_explicit(["a", "b"]);

        let ka = PlanKey::new(id, &a, Visibility::Public);
        let kb = PlanKey::new(id, &b, Visibility::Protected);
        assert_eq!(ka, kb);
        assert_eq!(FixedHashState.hash_one(&ka), FixedHashState.hash_one(&kb));
        assert_eq!(ka.privacy(), Visibility::MOST_PERMISSIVE);
    }

    #[test]
    fn empty_alias_map_equals_none() {
        let id = TypeId::of::<String>();
        let mut spec = ClassReflectSpec::of::<String>().with_alias("a", "b");
        spec.remove_alias("a");
        let plain = ClassReflectSpec::of::<String>();

        assert_eq!(
            PlanKey::new(id, &spec, Visibility::Public),
            PlanKey::new(id, &plain, Visibility::Public),
        );
    }

    #[test]
    fn explicit_presence_matters() {
        let id = TypeId::of::<String>();
        let empty = ClassReflectSpec::of::<String>().with_explicit(Vec::<String>::new());
        let implicit = ClassReflectSpec::of::<String>();

        assert_ne!(
            PlanKey::new(id, &empty, Visibility::Private),
            PlanKey::new(id, &implicit, Visibility::Private),
        );
    }
}
