/// Implements [`Typed`](crate::info::Typed) for a non-generic type of the
/// given [`JsonFamily`](crate::info::JsonFamily) variant.
macro_rules! impl_non_generic_typed {
    ($ty:ty, $family:ident) => {
        impl $crate::info::Typed for $ty {
            fn type_desc() -> &'static $crate::info::TypeDesc {
                static CELL: $crate::impls::NonGenericTypeDescCell =
                    $crate::impls::NonGenericTypeDescCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeDesc::of::<$ty>($crate::info::JsonFamily::$family)
                })
            }
        }
    };
}

/// Implements [`Typed`](crate::info::Typed) for `Self` inside a generic
/// impl, with the family computed by `$family`.
macro_rules! generic_type_desc {
    ($family:expr) => {{
        static CELL: $crate::impls::GenericTypeDescCell = $crate::impls::GenericTypeDescCell::new();
        CELL.get_or_insert::<Self>(|| $crate::info::TypeDesc::of::<Self>($family))
    }};
}

/// The body of [`Reflect::as_reflect`](crate::Reflect::as_reflect).
macro_rules! impl_as_reflect {
    () => {
        #[inline(always)]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }
    };
}

pub(super) use generic_type_desc;
pub(super) use impl_as_reflect;
pub(super) use impl_non_generic_typed;
