use std::sync::Arc;

use crate::guard::TraversalGuard;
use crate::info::ClassInfo;
use crate::plan::{AttributePlan, PlanCache, PlanKey, discover};
use crate::policy::EncodingPolicy;
use crate::projection::{FixedProjection, GrowableProjection, ObjectProjection, Projection};
use crate::{MapError, Node, Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Encoder

/// Maps values to [`Node`] trees under one [`EncodingPolicy`].
///
/// Terminals map directly. Sequences and string keyed maps are walked.
/// Class objects go through their [`AttributePlan`], taken from the
/// [`PlanCache`] when the policy caches plans and discovered otherwise.
/// Every container and object is entered into a [`TraversalGuard`] while
/// its content is mapped, so reference cycles fail instead of recursing
/// forever.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_json_reflect::{Node, encode::Encoder, policy::EncodingPolicy};
///
/// let scores = BTreeMap::from([("alice".to_owned(), vec![3_u8, 5])]);
///
/// let policy = EncodingPolicy::new();
/// let node = Encoder::new(&policy).encode(&scores).unwrap();
///
/// let (name, value) = node.as_object().unwrap().iter().next().unwrap();
/// assert_eq!(name, "alice");
/// assert_eq!(value.as_array().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    policy: &'a EncodingPolicy,
    cache: &'a PlanCache,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder using the process-wide [`PlanCache`].
    #[inline]
    pub fn new(policy: &'a EncodingPolicy) -> Self {
        Self::with_cache(policy, PlanCache::global())
    }

    /// Creates an encoder using `cache`.
    #[inline]
    pub fn with_cache(policy: &'a EncodingPolicy, cache: &'a PlanCache) -> Self {
        Self { policy, cache }
    }

    #[inline]
    pub fn policy(&self) -> &'a EncodingPolicy {
        self.policy
    }

    #[inline]
    pub fn cache(&self) -> &'a PlanCache {
        self.cache
    }

    /// Maps `value` with a fresh [`TraversalGuard`].
    pub fn encode(&self, value: &dyn Reflect) -> Result<Node, MapError> {
        let mut guard = TraversalGuard::new();
        self.encode_with_guard(value, &mut guard)
    }

    /// Maps `value` with a caller supplied guard.
    ///
    /// The guard is back to its previous depth when this returns, whether
    /// mapping succeeded or not.
    #[inline]
    pub fn encode_with_guard(
        &self,
        value: &dyn Reflect,
        guard: &mut TraversalGuard,
    ) -> Result<Node, MapError> {
        self.map_value(value, guard)
    }

    /// Maps one value of any shape.
    pub fn map_value(&self, value: &dyn Reflect, guard: &mut TraversalGuard) -> Result<Node, MapError> {
        let node = match value.reflect_ref() {
            ReflectRef::Null => Node::Null,
            ReflectRef::Bool(v) => Node::Bool(v),
            ReflectRef::Number(v) => Node::Number(v),
            ReflectRef::Text(v) => Node::Text(v.into_owned()),
            ReflectRef::Date(v) => Node::Date(v),
            ReflectRef::Forward(inner) => return self.map_value(inner, guard),
            ReflectRef::Sequence(seq) => {
                let mut scope = guard.enter(value)?;
                let mut items = Vec::with_capacity(seq.len());
                for item in seq.iter() {
                    items.push(self.map_value(item, &mut scope)?);
                }
                Node::Array(items)
            }
            ReflectRef::Associative(map) => {
                let mut scope = guard.enter(value)?;
                let mut projection = GrowableProjection::with_capacity(map.len());
                for (key, item) in map.iter() {
                    projection.push(Arc::from(key), self.map_value(item, &mut scope)?);
                }
                Node::Object(projection.into())
            }
            ReflectRef::Object(class) => return self.map_object(value, class, guard),
        };
        Ok(node)
    }

    /// Maps a class object through its attribute plan.
    ///
    /// When the policy does not reflect unknown types, the object maps to
    /// its text rendering, or to its class name when it has none.
    pub fn map_object(
        &self,
        object: &dyn Reflect,
        class: &'static ClassInfo,
        guard: &mut TraversalGuard,
    ) -> Result<Node, MapError> {
        if !self.policy.reflect_unknown_types() {
            let text = class.render(object).unwrap_or_else(|| class.name().to_owned());
            return Ok(Node::Text(text));
        }

        let mut scope = guard.enter(object)?;
        let (plan, cached) = self.plan_for(object, class)?;

        let mut projection: ObjectProjection = if cached {
            FixedProjection::for_plan(&plan).into()
        } else {
            GrowableProjection::with_capacity(plan.len()).into()
        };

        for (name, accessor) in plan.iter() {
            let fetched = accessor
                .read(object)
                .map_err(|source| MapError::AccessorInvocation {
                    object: class.describe(object),
                    class: class.type_path(),
                    accessor: accessor.source(),
                    source,
                })?;
            let value = self.map_value(&*fetched, &mut scope)?;
            projection.push(name.clone(), value);
        }

        Ok(Node::Object(projection))
    }

    /// Returns the plan of `class` under the policy, and whether it came
    /// from the cache.
    ///
    /// With caching on, a missing plan is discovered and stored. A cached
    /// plan that fails its consistency check is reported as
    /// [`MapError::CachePoisoning`].
    pub fn plan_for(
        &self,
        object: &dyn Reflect,
        class: &'static ClassInfo,
    ) -> Result<(Arc<AttributePlan>, bool), MapError> {
        let spec = self.policy.resolve_spec(class.ty());
        let threshold = self.policy.privacy_threshold();

        if !self.policy.cache_plans() {
            let plan = discover(class, &spec, threshold)
                .map_err(|err| err.promote(class.describe(object)))?;
            return Ok((Arc::new(plan), false));
        }

        let key = PlanKey::new(class.id(), &spec, threshold);

        if let Some(plan) = self.cache.lookup(&key) {
            // Unreachable while `AttributePlan::new` asserts equal lengths.
            if !plan.is_consistent() {
                log::warn!("cached plan of `{}` is inconsistent", class.type_path());
                return Err(MapError::CachePoisoning {
                    class: class.type_path(),
                    names: plan.names().len(),
                    accessors: plan.accessors().len(),
                });
            }
            crate::cfg::debug! {
                assert_eq!(plan.class().id(), class.id(), "plan cached under another class");
            }
            log::trace!("plan cache hit for `{}`", class.type_path());
            return Ok((plan, true));
        }

        log::trace!("plan cache miss for `{}`", class.type_path());
        let plan = discover(class, &spec, threshold)
            .map_err(|err| err.promote(class.describe(object)))?;
        Ok((self.cache.store(key, plan), false))
    }
}

// -----------------------------------------------------------------------------
// Tests
