use crate::info::TypeDesc;

/// Returns `true` if a getter returning `getter` may stand in for an
/// attribute declared as `attribute`.
///
/// Holds for the same type, when `getter` is a supertype of `attribute`
/// (an ancestor, or `dyn Reflect`), or when both belong to the same
/// interchangeable [`JsonFamily`](crate::info::JsonFamily).
pub fn is_compatible(getter: &TypeDesc, attribute: &TypeDesc) -> bool {
    if getter.is_supertype_of(attribute) {
        return true;
    }
    getter.family() == attribute.family() && getter.family().is_interchangeable()
}

#[cfg(test)]
mod tests {
    use super::is_compatible;
    use crate::Reflect;
    use crate::fixtures::{Employee, Person};
    use crate::info::{Typed, TypeDesc};

    fn desc<T: Typed + ?Sized>() -> &'static TypeDesc {
        T::type_desc()
    }

    #[test]
    fn same_family_is_compatible() {
        assert!(is_compatible(desc::<u64>(), desc::<u32>()));
        assert!(is_compatible(desc::<String>(), desc::<Option<String>>()));
        assert!(is_compatible(desc::<Vec<u8>>(), desc::<[String; 2]>()));
        assert!(!is_compatible(desc::<String>(), desc::<Vec<String>>()));
        assert!(!is_compatible(desc::<bool>(), desc::<u8>()));
    }

    #[test]
    fn supertypes_are_compatible() {
        assert!(is_compatible(desc::<Person>(), desc::<Employee>()));
        assert!(!is_compatible(desc::<Employee>(), desc::<Person>()));
        assert!(is_compatible(desc::<dyn Reflect>(), desc::<Employee>()));
        assert!(is_compatible(desc::<Box<dyn Reflect>>(), desc::<u8>()));
    }

    #[test]
    fn temporal_needs_same_type() {
        use std::time::SystemTime;
        assert!(is_compatible(desc::<SystemTime>(), desc::<SystemTime>()));
        assert!(!is_compatible(desc::<SystemTime>(), desc::<Option<SystemTime>>()));
    }
}
