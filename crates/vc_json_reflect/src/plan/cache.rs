use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use vc_utils::collections::ShardedMap;

use crate::plan::{AttributePlan, PlanKey};

// -----------------------------------------------------------------------------
// CacheStats

/// Counters of a [`PlanCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Number of stored plans when the stats were taken.
    pub plans: usize,
}

// -----------------------------------------------------------------------------
// PlanCache

/// Memoized [`AttributePlan`]s keyed by [`PlanKey`].
///
/// Keys are spread over independently locked shards, so lookups of
/// unrelated classes do not contend. Plans are stored once and never
/// modified; the first plan stored for a key wins.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::impl_class;
/// use vc_json_reflect::info::{Class, Visibility};
/// use vc_json_reflect::plan::{PlanCache, PlanKey, discover};
/// use vc_json_reflect::policy::ClassReflectSpec;
///
/// struct Tag {
///     name: String,
/// }
///
/// impl_class!(Tag, |class| class.field::<String>("name", Visibility::Public, |t| &t.name));
///
/// let cache = PlanCache::new();
/// let spec = ClassReflectSpec::of::<Tag>();
/// let key = PlanKey::new(Tag::class_info().id(), &spec, Visibility::Public);
///
/// assert!(cache.lookup(&key).is_none());
/// let plan = discover(Tag::class_info(), &spec, Visibility::Public).unwrap();
/// cache.store(key.clone(), plan);
/// assert_eq!(cache.lookup(&key).unwrap().len(), 1);
///
/// let stats = cache.stats();
/// assert_eq!((stats.hits, stats.misses, stats.plans), (1, 1, 1));
/// ```
pub struct PlanCache {
    plans: ShardedMap<PlanKey, Arc<AttributePlan>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PlanCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            plans: ShardedMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates an empty cache with at least `shards` shards.
    pub fn with_shards(shards: usize) -> Self {
        Self {
            plans: ShardedMap::with_shards(shards),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide cache.
    pub fn global() -> &'static PlanCache {
        static GLOBAL: OnceLock<PlanCache> = OnceLock::new();
        GLOBAL.get_or_init(PlanCache::new)
    }

    /// Returns the plan stored for `key`.
    pub fn lookup(&self, key: &PlanKey) -> Option<Arc<AttributePlan>> {
        let found = self.plans.get(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Stores `plan` for `key` unless a plan is already present, and
    /// returns the stored plan.
    pub fn store(&self, key: PlanKey, plan: AttributePlan) -> Arc<AttributePlan> {
        let class = plan.class().type_path();
        let stored = self.plans.insert_if_absent(key, Arc::new(plan));
        log::debug!("cached a plan of {} attributes for `{class}`", stored.len());
        stored
    }

    /// Drops every stored plan. Counters are kept.
    pub fn clear(&self) {
        self.plans.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            plans: self.plans.len(),
        }
    }
}

impl Default for PlanCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PlanCache;
    use crate::fixtures::Person;
    use crate::info::{Class, Visibility};
    use crate::plan::{PlanKey, discover};
    use crate::policy::ClassReflectSpec;

    #[test]
    fn first_stored_plan_wins() {
        let cache = PlanCache::with_shards(2);
        let class = Person::class_info();
        let spec = ClassReflectSpec::of::<Person>();
        let key = PlanKey::new(class.id(), &spec, Visibility::Public);

        let first = cache.store(key.clone(), discover(class, &spec, Visibility::Public).unwrap());
        let second = cache.store(key.clone(), discover(class, &spec, Visibility::Private).unwrap());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 3);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.lookup(&key).is_none());
    }

    #[test]
    fn concurrent_readers_see_complete_plans() {
        let cache = PlanCache::new();
        let class = Person::class_info();
        let spec = ClassReflectSpec::of::<Person>();
        let key = PlanKey::new(class.id(), &spec, Visibility::Public);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..64 {
                        let plan = match cache.lookup(&key) {
                            Some(plan) => plan,
                            None => cache.store(
                                key.clone(),
                                discover(class, &spec, Visibility::Public).unwrap(),
                            ),
                        };
                        assert!(plan.is_consistent());
                        assert_eq!(plan.len(), 3);
                    }
                });
            }
        });

        assert_eq!(cache.len(), 1);
    }
}
