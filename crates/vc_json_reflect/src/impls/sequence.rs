use core::hash::BuildHasher;
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::impls::utils::{generic_type_desc, impl_as_reflect};
use crate::info::{JsonFamily, TypeDesc, Typed};
use crate::{Reflect, ReflectRef, Sequence};

macro_rules! impl_sequence {
    ($ty:ty, <$($param:ident),*>, where $($where:tt)+) => {
        impl<$($param),*> Typed for $ty
        where $($where)+
        {
            fn type_desc() -> &'static TypeDesc {
                generic_type_desc!(JsonFamily::Sequence)
            }
        }

        impl<$($param),*> Reflect for $ty
        where $($where)+
        {
            impl_as_reflect!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Sequence(self)
            }
        }

        impl<$($param),*> Sequence for $ty
        where $($where)+
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(IntoIterator::into_iter(self).map(|item| item as &dyn Reflect))
            }
        }
    };
}

impl_sequence!(Vec<T>, <T>, where T: Reflect + Typed);
impl_sequence!(VecDeque<T>, <T>, where T: Reflect + Typed);
impl_sequence!(BTreeSet<T>, <T>, where T: Reflect + Typed);
impl_sequence!(
    HashSet<T, S>,
    <T, S>,
    where T: Reflect + Typed, S: BuildHasher + Send + Sync + 'static
);

// -----------------------------------------------------------------------------
// Arrays

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_desc() -> &'static TypeDesc {
        generic_type_desc!(JsonFamily::Sequence)
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }
}

impl<T: Reflect + Typed, const N: usize> Sequence for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.as_slice().iter().map(|item| item as &dyn Reflect))
    }
}
