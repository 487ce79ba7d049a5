//! A concurrent hash map split into independently locked shards.
//!
//! Each key is routed to one shard by its [`FixedHashState`] hash, so
//! readers and writers of unrelated keys rarely touch the same lock.
//! Values are handed out by clone, which keeps guards short-lived; store
//! cheap handles such as `Arc<T>`.

use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::sync::{PoisonError, RwLock};

use hashbrown::hash_map::Entry;

use crate::hash::{FixedHashState, HashMap};

// -----------------------------------------------------------------------------
// Config

const DEFAULT_SHARDS: usize = 16;

// -----------------------------------------------------------------------------
// ShardedMap

/// A hash map safe for concurrent readers and writers.
///
/// # Examples
///
/// ```
/// use vc_utils::collections::ShardedMap;
///
/// let map = ShardedMap::<&str, u32>::new();
/// assert_eq!(map.get(&"a"), None);
/// assert_eq!(map.insert_if_absent("a", 1), 1);
/// assert_eq!(map.insert_if_absent("a", 2), 1);
/// assert_eq!(map.get(&"a"), Some(1));
/// ```
pub struct ShardedMap<K, V> {
    shards: Box<[RwLock<HashMap<K, V>>]>,
}

impl<K: Eq + Hash, V: Clone> ShardedMap<K, V> {
    /// Creates an empty map with the default number of shards.
    #[inline]
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Creates an empty map with at least `shards` shards.
    ///
    /// The count is rounded up to a power of two.
    pub fn with_shards(shards: usize) -> Self {
        let count = shards.max(1).next_power_of_two();
        let shards = (0..count)
            .map(|_| RwLock::new(HashMap::default()))
            .collect();
        Self { shards }
    }

    #[inline]
    fn shard(&self, key: &K) -> &RwLock<HashMap<K, V>> {
        let hash = FixedHashState.hash_one(key);
        // High bits pick the shard, hashbrown uses the low bits for buckets.
        let index = (hash >> 32) as usize & (self.shards.len() - 1);
        &self.shards[index]
    }

    /// Returns a clone of the value stored for `key`.
    pub fn get(&self, key: &K) -> Option<V> {
        self.shard(key)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `value` unless `key` is already present.
    ///
    /// Returns the value that is stored after the call.
    pub fn insert_if_absent(&self, key: K, value: V) -> V {
        let mut shard = self
            .shard(&key)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match shard.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(value).clone(),
        }
    }

    /// Removes every entry. Shards are cleared one at a time.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.write().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    /// Returns the number of entries.
    ///
    /// Under concurrent writes this is a snapshot that may be stale.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Returns `true` if no entries are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of shards.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}

impl<K: Eq + Hash, V: Clone> Default for ShardedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ShardedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedMap")
            .field("shards", &self.shards.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
