//! Cache Module
//!
//! A bounded, thread-safe, in-memory cache with TTL expiry and LRU eviction.
//!
//! The cache is divided into shards, each guarded by its own mutex, so
//! concurrent callers on different keys rarely contend. Bounded caches use a
//! single shard: that keeps the recency order global and makes the size
//! bound exact, at the cost of coarser locking. Expiry is enforced lazily;
//! see [`Cache::run_maintenance`].

use std::hash::{BuildHasher, Hash};
use std::num::NonZero;
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::CacheConfig;
use shard::Shard;

mod entry;
mod lru;
mod shard;
pub(crate) mod stats;


pub use stats::CacheStats;

// == Cache ==
/// Bounded concurrent key-value cache with optional TTL expiry and
/// statistics.
///
/// All operations take `&self`; wrap the cache in an [`std::sync::Arc`] to
/// share it between threads. Values are cloned out on lookup, so wrap large
/// payloads in an `Arc` if cloning is too expensive.
///
/// # Example
/// ```
/// use entity_cache::{Cache, CacheConfig};
///
/// let cache = Cache::new(CacheConfig::new().maximum_size(100));
///
/// cache.insert("key1", "value1");
/// assert_eq!(cache.get(&"key1"), Some("value1"));
/// assert_eq!(cache.get(&"key2"), None);
/// ```
#[derive(Debug)]
pub struct Cache<K, V> {
    hash_builder: ahash::RandomState,
    shards: Vec<Mutex<Shard<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache from the given configuration. Never fails; invalid
    /// settings have already been coerced by [`CacheConfig`].
    pub fn new(config: CacheConfig) -> Self {
        let shard_count = match config.max_size() {
            // A single eviction domain keeps the bound exact and the
            // recency order global.
            Some(_) => 1,
            None => {
                let parallelism = thread::available_parallelism()
                    .map(NonZero::get)
                    .unwrap_or(1);
                parallelism * 4
            }
        };

        let hash_builder = ahash::RandomState::new();
        let per_shard_hint = config.capacity_hint().map(|c| c.div_ceil(shard_count));

        let mut shards = Vec::with_capacity(shard_count);
        for _ in 0..shard_count {
            shards.push(Mutex::new(Shard::new(
                config.max_size(),
                per_shard_hint,
                config.expiry(),
                config.stats_enabled(),
                hash_builder.clone(),
            )));
        }

        Self {
            hash_builder,
            shards,
        }
    }

    fn shard_for(&self, key: &K) -> &Mutex<Shard<K, V>> {
        let hash = self.hash_builder.hash_one(key);
        &self.shards[hash as usize % self.shards.len()]
    }

    // == Insert ==
    /// Stores a key-value pair, resetting the entry's write and access
    /// timestamps.
    ///
    /// Returns the previous unexpired value if the key was present. May
    /// evict the least recently used entry to keep the cache within its
    /// configured maximum size.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let now = Instant::now();
        self.shard_for(&key).lock().insert(key, value, now)
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// A hit refreshes the entry's access timestamp, postponing
    /// after-access expiry. Records exactly one hit or miss per call when
    /// statistics are enabled.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.shard_for(key).lock().get(key, now)
    }

    // == Contains ==
    /// True iff an unexpired entry exists for `key`.
    ///
    /// Unlike [`Cache::get`] this is a pure peek: it does not refresh the
    /// access timestamp and records no statistics.
    pub fn contains_key(&self, key: &K) -> bool {
        let now = Instant::now();
        self.shard_for(key).lock().contains_key(key, now)
    }

    // == Invalidate ==
    /// Removes the entry for `key` if present; idempotent.
    pub fn invalidate(&self, key: &K) -> Option<V> {
        self.shard_for(key).lock().remove(key)
    }

    /// Removes all entries, shard by shard.
    ///
    /// Concurrent readers observe each shard as either fully populated or
    /// empty, never a torn entry.
    pub fn invalidate_all(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }

    /// Removes exactly the given keys. An empty input is a no-op and does
    /// not clear the cache.
    pub fn invalidate_keys<I>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.invalidate(&key);
        }
    }

    /// Removes every entry whose value satisfies the predicate.
    ///
    /// Each shard is scanned snapshot-then-remove under its own lock, so
    /// the scan is safe against concurrent mutation. Returns the number of
    /// entries removed.
    pub fn invalidate_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&V) -> bool,
    {
        self.shards
            .iter()
            .map(|shard| shard.lock().remove_matching(&predicate))
            .sum()
    }

    // == Size ==
    /// Cheap approximate count of entries.
    ///
    /// Expiry is enforced lazily, so this may overcount entries that have
    /// expired but not yet been purged. Use [`Cache::size`] for an accurate
    /// count.
    pub fn estimated_size(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Accurate count of live entries.
    ///
    /// Runs a full expiry sweep first, trading latency for accuracy.
    pub fn size(&self) -> usize {
        self.run_maintenance();
        self.estimated_size()
    }

    // == Maintenance ==
    /// Runs a full expiry sweep over all shards, purging every expired
    /// entry. Returns the number of entries purged.
    pub fn run_maintenance(&self) -> usize {
        let now = Instant::now();
        self.shards
            .iter()
            .map(|shard| shard.lock().purge_expired(now))
            .sum()
    }

    // == Stats ==
    /// Snapshot of the cumulative hit/miss/eviction counters.
    ///
    /// Counters only grow; they reset when the cache is recreated. All
    /// zeros when statistics are disabled.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        for shard in &self.shards {
            shard.lock().counters().add_to(&mut stats);
        }
        stats
    }
}
