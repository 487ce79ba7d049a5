use crate::policy::{ClassReflectSpec, EncodingPolicy};

// -----------------------------------------------------------------------------
// PolicyDefaults

/// The defaults every [`EncodingPolicy`] snapshot starts from.
///
/// An explicit value rather than a process-wide registry: load it once,
/// adjust it, and derive snapshots from it with
/// [`EncodingPolicy::derive`]. A derived snapshot is a copy, later changes
/// to the defaults do not reach it.
#[derive(Debug, Clone, Default)]
pub struct PolicyDefaults {
    policy: EncodingPolicy,
}

impl PolicyDefaults {
    /// Returns the built-in defaults, see [`EncodingPolicy::new`].
    #[inline]
    pub const fn builtin() -> Self {
        Self {
            policy: EncodingPolicy::new(),
        }
    }

    /// Returns the built-in defaults plus every class spec submitted with
    /// [`submit_default_spec!`](crate::submit_default_spec).
    ///
    /// Without the `auto_register` feature this equals [`builtin`](Self::builtin).
    pub fn load() -> Self {
        let mut defaults = Self::builtin();
        collect_submitted(&mut defaults.policy);
        defaults
    }

    #[inline]
    pub fn policy(&self) -> &EncodingPolicy {
        &self.policy
    }

    #[inline]
    pub fn policy_mut(&mut self) -> &mut EncodingPolicy {
        &mut self.policy
    }

    /// Registers `spec`, returning the replaced one.
    #[inline]
    pub fn insert_class_spec(&mut self, spec: ClassReflectSpec) -> Option<ClassReflectSpec> {
        self.policy.insert_class_spec(spec)
    }
}

#[cfg(feature = "auto_register")]
fn collect_submitted(policy: &mut EncodingPolicy) {
    for entry in inventory::iter::<DefaultSpec> {
        let spec = (entry.build)();
        log::debug!("registering default spec for `{}`", spec.target().path());
        if let Some(previous) = policy.insert_class_spec(spec) {
            log::warn!(
                "several default specs submitted for `{}`, keeping one of them",
                previous.target().path()
            );
        }
    }
}

#[cfg(not(feature = "auto_register"))]
fn collect_submitted(_: &mut EncodingPolicy) {}

// -----------------------------------------------------------------------------
// DefaultSpec

/// A class spec submitted at compile time, collected by
/// [`PolicyDefaults::load`].
///
/// Submit entries with [`submit_default_spec!`](crate::submit_default_spec).
#[cfg(feature = "auto_register")]
pub struct DefaultSpec {
    build: fn() -> ClassReflectSpec,
}

#[cfg(feature = "auto_register")]
impl DefaultSpec {
    #[inline]
    pub const fn new(build: fn() -> ClassReflectSpec) -> Self {
        Self { build }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(DefaultSpec);

/// Submits a default [`ClassReflectSpec`] for [`PolicyDefaults::load`].
///
/// The argument is a `fn() -> ClassReflectSpec`, usually a closure without
/// captures. Only available with the `auto_register` feature.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::policy::{ClassReflectSpec, EncodingPolicy, PolicyDefaults};
///
/// vc_json_reflect::submit_default_spec!(|| ClassReflectSpec::of::<String>().with_alias("len", "length"));
///
/// let policy = EncodingPolicy::derive(&PolicyDefaults::load());
/// assert!(policy.class_spec_of::<String>().is_some());
/// ```
///
/// [`ClassReflectSpec`]: crate::policy::ClassReflectSpec
/// [`PolicyDefaults::load`]: crate::policy::PolicyDefaults::load
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_default_spec {
    ($build:expr $(,)?) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::policy::DefaultSpec::new($build)
        }
    };
}
