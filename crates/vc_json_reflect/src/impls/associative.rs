use core::hash::BuildHasher;
use std::collections::{BTreeMap, HashMap};

use crate::impls::utils::{generic_type_desc, impl_as_reflect};
use crate::info::{JsonFamily, TypeDesc, Typed};
use crate::{Associative, Reflect, ReflectRef};

macro_rules! impl_associative {
    ($ty:ty, <$($param:ident),*>, where $($where:tt)+) => {
        impl<$($param),*> Typed for $ty
        where $($where)+
        {
            fn type_desc() -> &'static TypeDesc {
                generic_type_desc!(JsonFamily::Associative)
            }
        }

        impl<$($param),*> Reflect for $ty
        where $($where)+
        {
            impl_as_reflect!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Associative(self)
            }
        }

        impl<$($param),*> Associative for $ty
        where $($where)+
        {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
                Box::new(
                    IntoIterator::into_iter(self)
                        .map(|(key, value)| (key.as_str(), value as &dyn Reflect)),
                )
            }
        }
    };
}

impl_associative!(BTreeMap<String, V>, <V>, where V: Reflect + Typed);
impl_associative!(
    HashMap<String, V, S>,
    <V, S>,
    where V: Reflect + Typed, S: BuildHasher + Send + Sync + 'static
);
