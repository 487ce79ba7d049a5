use core::any::TypeId;
use std::borrow::Cow;

use vc_utils::TypeIdMap;

use crate::info::{TypeDesc, Typed, Visibility};
use crate::policy::{ClassReflectSpec, DateFormat, NumberFormat, PolicyDefaults};

// -----------------------------------------------------------------------------
// EncodingPolicy

/// The encoding settings in effect for one or more encode calls.
///
/// A snapshot is derived from [`PolicyDefaults`] by copy: it shares no
/// mutable state with the defaults nor with other snapshots, so changes made
/// through the setters stay local. [`Clone`] is a deep copy as well,
/// formatter handles included.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::info::Visibility;
/// use vc_json_reflect::policy::{ClassReflectSpec, EncodingPolicy};
///
/// let base = EncodingPolicy::new().with_privacy_threshold(Visibility::Protected);
///
/// let mut copy = base.clone();
/// copy.class_spec_or_insert::<String>().insert_alias("len", "length");
///
/// assert!(copy.class_spec_of::<String>().is_some());
/// assert!(base.class_spec_of::<String>().is_none());
/// assert_eq!(copy.privacy_threshold(), Visibility::Protected);
/// ```
#[derive(Debug, Clone)]
pub struct EncodingPolicy {
    privacy_threshold: Visibility,
    reflect_unknown_types: bool,
    cache_plans: bool,
    class_specs: TypeIdMap<ClassReflectSpec>,
    number_format: Option<Box<dyn NumberFormat>>,
    date_format: Option<Box<dyn DateFormat>>,
}

impl EncodingPolicy {
    /// Creates a snapshot of the built-in defaults: public members only,
    /// unknown types reflected, plans cached, no class specs and no
    /// formatters.
    #[inline]
    pub const fn new() -> Self {
        Self {
            privacy_threshold: Visibility::Public,
            reflect_unknown_types: true,
            cache_plans: true,
            class_specs: TypeIdMap::new(),
            number_format: None,
            date_format: None,
        }
    }

    /// Creates a snapshot by copying `defaults`.
    #[inline]
    pub fn derive(defaults: &PolicyDefaults) -> Self {
        defaults.policy().clone()
    }

    // -------------------------------------------------------------------------
    // Scalars

    #[inline]
    pub fn privacy_threshold(&self) -> Visibility {
        self.privacy_threshold
    }

    #[inline]
    pub fn set_privacy_threshold(&mut self, threshold: Visibility) {
        self.privacy_threshold = threshold;
    }

    #[inline]
    pub fn with_privacy_threshold(mut self, threshold: Visibility) -> Self {
        self.privacy_threshold = threshold;
        self
    }

    /// Whether class objects are mapped through their attributes. When
    /// `false` they map to their text rendering.
    #[inline]
    pub fn reflect_unknown_types(&self) -> bool {
        self.reflect_unknown_types
    }

    #[inline]
    pub fn set_reflect_unknown_types(&mut self, reflect: bool) {
        self.reflect_unknown_types = reflect;
    }

    #[inline]
    pub fn with_reflect_unknown_types(mut self, reflect: bool) -> Self {
        self.reflect_unknown_types = reflect;
        self
    }

    /// Whether discovered plans are stored in and read from the cache.
    #[inline]
    pub fn cache_plans(&self) -> bool {
        self.cache_plans
    }

    #[inline]
    pub fn set_cache_plans(&mut self, cache: bool) {
        self.cache_plans = cache;
    }

    #[inline]
    pub fn with_cache_plans(mut self, cache: bool) -> Self {
        self.cache_plans = cache;
        self
    }

    // -------------------------------------------------------------------------
    // Formatters

    #[inline]
    pub fn number_format(&self) -> Option<&dyn NumberFormat> {
        self.number_format.as_deref()
    }

    #[inline]
    pub fn set_number_format(&mut self, format: Option<Box<dyn NumberFormat>>) {
        self.number_format = format;
    }

    #[inline]
    pub fn with_number_format(mut self, format: impl NumberFormat + 'static) -> Self {
        self.number_format = Some(Box::new(format));
        self
    }

    #[inline]
    pub fn date_format(&self) -> Option<&dyn DateFormat> {
        self.date_format.as_deref()
    }

    #[inline]
    pub fn set_date_format(&mut self, format: Option<Box<dyn DateFormat>>) {
        self.date_format = format;
    }

    #[inline]
    pub fn with_date_format(mut self, format: impl DateFormat + 'static) -> Self {
        self.date_format = Some(Box::new(format));
        self
    }

    // -------------------------------------------------------------------------
    // Class specs

    #[inline]
    pub fn class_spec(&self, class: TypeId) -> Option<&ClassReflectSpec> {
        self.class_specs.get(&class)
    }

    #[inline]
    pub fn class_spec_of<C: ?Sized + 'static>(&self) -> Option<&ClassReflectSpec> {
        self.class_specs.get_type::<C>()
    }

    #[inline]
    pub fn class_spec_mut(&mut self, class: TypeId) -> Option<&mut ClassReflectSpec> {
        self.class_specs.get_mut(&class)
    }

    /// Returns the spec of `C`, registering an empty one first if needed.
    pub fn class_spec_or_insert<C: Typed + ?Sized>(&mut self) -> &mut ClassReflectSpec {
        let target = C::type_desc();
        self.class_specs
            .get_or_insert(target.id(), || ClassReflectSpec::new(target))
    }

    /// Registers `spec` for its target class, returning the replaced spec.
    #[inline]
    pub fn insert_class_spec(&mut self, spec: ClassReflectSpec) -> Option<ClassReflectSpec> {
        self.class_specs.insert(spec.target().id(), spec)
    }

    #[inline]
    pub fn remove_class_spec(&mut self, class: TypeId) -> Option<ClassReflectSpec> {
        self.class_specs.remove(&class)
    }

    #[inline]
    pub fn with_class_spec(mut self, spec: ClassReflectSpec) -> Self {
        self.insert_class_spec(spec);
        self
    }

    /// Returns the registered spec of `target`, or an empty one.
    pub fn resolve_spec(&self, target: &'static TypeDesc) -> Cow<'_, ClassReflectSpec> {
        match self.class_specs.get(&target.id()) {
            Some(spec) => Cow::Borrowed(spec),
            None => Cow::Owned(ClassReflectSpec::new(target)),
        }
    }
}

impl Default for EncodingPolicy {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests
