//! Second-Level Cache Module
//!
//! The narrow contract through which a host persistence layer consumes the
//! cache: object-id keyed storage of entity state, whole-cache and
//! per-type eviction, and an accurate size query.
//!
//! Keys are opaque object identities supplied by the host; values are
//! [`EntityState`] objects. The cache is a best-effort memoization layer:
//! losing its contents never affects correctness, only performance.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::entity::EntityState;

// == Level 2 Cache ==
/// Second-level entity cache over a [`Cache`], with operations named after
/// the host contract.
///
/// # Example
/// ```
/// use entity_cache::{CacheConfig, EntityState, Level2Cache};
///
/// #[derive(Clone)]
/// struct PersonState {
///     name: String,
/// }
///
/// impl EntityState for PersonState {
///     fn entity_type(&self) -> &str {
///         "Person"
///     }
/// }
///
/// let cache: Level2Cache<u64, PersonState> =
///     Level2Cache::new(CacheConfig::new().maximum_size(1000));
///
/// cache.put(1, PersonState { name: "Ada".into() });
/// assert!(cache.contains_oid(&1));
///
/// cache.evict_entity_type("Person", false);
/// assert_eq!(cache.size(), 0);
/// ```
#[derive(Debug)]
pub struct Level2Cache<K, V> {
    cache: Cache<K, V>,
}

impl<K, V> Level2Cache<K, V>
where
    K: Clone + Eq + Hash,
    V: EntityState,
{
    // == Constructors ==
    /// Builds the cache from an already-assembled configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            cache: Cache::new(config),
        }
    }

    /// Builds the cache from the host's property bundle; invalid settings
    /// are coerced to defaults, never rejected.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        Self::new(CacheConfig::from_properties(properties))
    }

    // == Operations ==
    /// Caches entity state under its object id, returning the state it
    /// replaced if the id was already cached.
    pub fn put(&self, oid: K, state: V) -> Option<V> {
        self.cache.insert(oid, state)
    }

    /// Returns the cached state for the object id, if present and not
    /// expired.
    pub fn get(&self, oid: &K) -> Option<V> {
        self.cache.get(oid)
    }

    /// True iff unexpired state is cached for the object id. Does not count
    /// as an access.
    pub fn contains_oid(&self, oid: &K) -> bool {
        self.cache.contains_key(oid)
    }

    /// Evicts the state cached for the object id, if any.
    pub fn evict(&self, oid: &K) {
        self.cache.invalidate(oid);
    }

    /// Evicts everything.
    pub fn evict_all(&self) {
        self.cache.invalidate_all();
    }

    /// Evicts exactly the given object ids; an empty input evicts nothing.
    pub fn evict_keys<I>(&self, oids: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.cache.invalidate_keys(oids);
    }

    /// Evicts every cached state belonging to the given entity type,
    /// optionally including its subtypes. Returns the number of entries
    /// evicted.
    pub fn evict_entity_type(&self, entity_type: &str, include_subtypes: bool) -> usize {
        self.cache
            .invalidate_matching(|state| state.is_instance_of(entity_type, include_subtypes))
    }

    // == Size ==
    /// Number of live entries.
    ///
    /// Expiry is enforced lazily during writes and occasional reads, so the
    /// raw entry count can overshoot. Size queries are rare during normal
    /// operation, so we take the cost of a full sweep here in favor of an
    /// accurate count. Use [`Level2Cache::cache`] and
    /// [`Cache::estimated_size`] for the cheap approximation.
    pub fn size(&self) -> usize {
        self.cache.size()
    }

    /// Snapshot of the cumulative hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // == Close ==
    /// Releases all entries. Safe to call repeatedly and on an empty cache.
    pub fn close(&self) {
        self.evict_all();
    }

    /// The wrapped cache engine.
    pub fn cache(&self) -> &Cache<K, V> {
        &self.cache
    }
}
