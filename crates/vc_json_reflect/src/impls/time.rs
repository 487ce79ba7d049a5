use std::time::SystemTime;

use crate::impls::utils::{impl_as_reflect, impl_non_generic_typed};
use crate::{Reflect, ReflectRef};

impl_non_generic_typed!(SystemTime, Temporal);

impl Reflect for SystemTime {
    impl_as_reflect!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Date(*self)
    }
}
