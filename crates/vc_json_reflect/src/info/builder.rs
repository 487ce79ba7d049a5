use core::fmt::Display;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::access::ParentUpcast;
use crate::info::{AttributeInfo, Class, ClassInfo, JsonFamily, MethodInfo, ParentLink};
use crate::info::{Modifiers, TypeDesc, Typed, Visibility};
use crate::{BoxError, Reflect};

// -----------------------------------------------------------------------------
// ClassBuilder

/// Builds the [`ClassInfo`] of `C`.
///
/// Members are recorded in call order, which is the declaration order
/// used by implicit attribute selection.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::info::{ClassBuilder, Visibility};
///
/// struct Account {
///     id: u64,
///     owner: String,
/// }
/// # vc_json_reflect::impl_class!(Account, |class| class);
///
/// let info = ClassBuilder::<Account>::new()
///     .field::<u64>("id", Visibility::Public, |a| &a.id)
///     .field::<String>("owner", Visibility::Private, |a| &a.owner)
///     .getter::<String>("getOwner", Visibility::Public, |a| Ok(a.owner.clone()))
///     .build();
///
/// assert_eq!(info.attributes().len(), 2);
/// assert_eq!(info.method("getOwner").unwrap().property_name().as_deref(), Some("owner"));
/// ```
pub struct ClassBuilder<C> {
    ty: TypeDesc,
    parent: Option<ParentLink>,
    attributes: Vec<AttributeInfo>,
    methods: Vec<MethodInfo>,
    render: Option<fn(&dyn Reflect) -> Option<String>>,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Reflect> ClassBuilder<C> {
    /// Creates a builder for `C` with no members.
    pub fn new() -> Self {
        Self {
            ty: TypeDesc::of::<C>(JsonFamily::Object),
            parent: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            render: None,
            _marker: PhantomData,
        }
    }

    /// Overrides the type path reported for `C`.
    pub fn type_path(mut self, path: &'static str) -> Self {
        self.ty = self.ty.with_path(path);
        self
    }

    /// Declares an attribute without modifiers.
    pub fn field<T: Reflect + Typed>(
        self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&C) -> &T,
    ) -> Self {
        self.attribute(AttributeInfo::new(name, visibility, get))
    }

    /// Declares an attribute with modifiers.
    pub fn field_flagged<T: Reflect + Typed>(
        self,
        name: &'static str,
        visibility: Visibility,
        modifiers: Modifiers,
        get: fn(&C) -> &T,
    ) -> Self {
        self.attribute(AttributeInfo::new(name, visibility, get).with_modifiers(modifiers))
    }

    /// Declares a zero-argument method returning an owned value.
    pub fn getter<T: Reflect + Typed>(
        self,
        name: &'static str,
        visibility: Visibility,
        call: fn(&C) -> Result<T, BoxError>,
    ) -> Self {
        self.method(MethodInfo::getter(name, visibility, call))
    }

    /// Declares a zero-argument method returning a reference into `C`.
    pub fn getter_ref<T: Reflect + Typed>(
        self,
        name: &'static str,
        visibility: Visibility,
        call: fn(&C) -> &T,
    ) -> Self {
        self.method(MethodInfo::getter_ref(name, visibility, call))
    }

    /// Declares a method the mapper cannot invoke.
    pub fn declare_method(
        self,
        name: &'static str,
        visibility: Visibility,
        arity: usize,
        returns: Option<fn() -> &'static TypeDesc>,
    ) -> Self {
        self.method(MethodInfo::declared(name, visibility, arity, returns))
    }

    /// Makes `P` the parent class of `C`, viewed through `upcast`.
    ///
    /// Attributes and accessors of `P` and its ancestors are inherited.
    pub fn extends<P: Class>(mut self, upcast: fn(&C) -> &P) -> Self {
        self.ty = self.ty.with_parent(<P as Typed>::type_desc);
        self.parent = Some(ParentLink::new(
            <P as Class>::class_info,
            Arc::new(ParentUpcast::new(upcast)),
        ));
        self
    }

    #[inline]
    pub fn attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[inline]
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(self) -> ClassInfo {
        ClassInfo {
            ty: self.ty,
            parent: self.parent,
            attributes: self.attributes.into_boxed_slice(),
            methods: self.methods.into_boxed_slice(),
            render: self.render,
        }
    }
}

impl<C: Reflect + Display> ClassBuilder<C> {
    /// Renders objects of `C` with their [`Display`] implementation.
    pub fn render_with_display(mut self) -> Self {
        self.render = Some(render_display::<C>);
        self
    }
}

impl<C: Reflect> Default for ClassBuilder<C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

fn render_display<C: Reflect + Display>(object: &dyn Reflect) -> Option<String> {
    object.downcast_ref::<C>().map(ToString::to_string)
}

// -----------------------------------------------------------------------------
// impl_class

/// Implements [`Class`], [`Typed`] and [`Reflect`] for a non-generic type.
///
/// The second argument receives a fresh [`ClassBuilder`] and returns it
/// with the members declared. It runs once, on first use of the class.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::impl_class;
/// use vc_json_reflect::info::{Class, Visibility};
///
/// struct Animal {
///     name: String,
/// }
///
/// struct Dog {
///     base: Animal,
///     good: bool,
/// }
///
/// impl_class!(Animal, |class| class.field::<String>("name", Visibility::Public, |a| &a.name));
/// impl_class!(Dog, |class| class
///     .extends::<Animal>(|d| &d.base)
///     .field::<bool>("good", Visibility::Public, |d| &d.good));
///
/// let info = Dog::class_info();
/// assert_eq!(info.parent().unwrap().name(), "Animal");
/// assert!(info.ty().parent().unwrap().is::<Animal>());
/// ```
///
/// [`Class`]: crate::info::Class
/// [`Typed`]: crate::info::Typed
/// [`Reflect`]: crate::Reflect
/// [`ClassBuilder`]: crate::info::ClassBuilder
#[macro_export]
macro_rules! impl_class {
    ($ty:ty, $build:expr $(,)?) => {
        impl $crate::info::Class for $ty {
            fn class_info() -> &'static $crate::info::ClassInfo {
                static CELL: $crate::impls::NonGenericClassCell =
                    $crate::impls::NonGenericClassCell::new();
                CELL.get_or_init(|| {
                    let build: fn(
                        $crate::info::ClassBuilder<$ty>,
                    ) -> $crate::info::ClassBuilder<$ty> = $build;
                    build($crate::info::ClassBuilder::new()).build()
                })
            }
        }

        impl $crate::info::Typed for $ty {
            #[inline]
            fn type_desc() -> &'static $crate::info::TypeDesc {
                <$ty as $crate::info::Class>::class_info().ty()
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn as_reflect(&self) -> &dyn $crate::Reflect {
                self
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Object(<$ty as $crate::info::Class>::class_info())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{Employee, Person};
    use crate::info::{Class, JsonFamily, Typed};

    #[test]
    fn inheritance_links_descriptors() {
        let employee = Employee::class_info();
        let person = Person::class_info();

        assert!(core::ptr::eq(employee.parent().unwrap(), person));
        assert!(Person::type_desc().is_supertype_of(Employee::type_desc()));
        assert!(!Employee::type_desc().is_supertype_of(Person::type_desc()));
        assert_eq!(Employee::type_desc().family(), JsonFamily::Object);
    }

    #[test]
    fn lineage_is_most_derived_first() {
        let names: Vec<_> = Employee::class_info().lineage().map(|c| c.name()).collect();
        assert_eq!(names, ["Employee", "Person"]);
    }

    #[test]
    fn members_keep_declaration_order() {
        let names: Vec<_> = Person::class_info()
            .attributes()
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, ["firstName", "lastName", "age", "password", "scratch"]);
    }
}
