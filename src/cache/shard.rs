//! Cache Shard Module
//!
//! A single-lock slice of the cache: hash map storage combined with LRU
//! tracking, lazy TTL expiry, and statistics counters. The parent
//! [`Cache`](crate::Cache) wraps each shard in a mutex and routes keys to
//! shards by hash.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use crate::cache::entry::CacheEntry;
use crate::cache::lru::LruTracker;
use crate::cache::stats::Counters;
use crate::config::ExpiryPolicy;

// == Cache Shard ==
#[derive(Debug)]
pub(crate) struct Shard<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>, ahash::RandomState>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance counters, aggregated across shards on snapshot
    counters: Counters,
    /// Maximum number of entries this shard may hold, `None` = unbounded
    limit: Option<usize>,
    /// Expiry policy shared by all entries
    expiry: Option<ExpiryPolicy>,
}

impl<K, V> Shard<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    pub fn new(
        limit: Option<usize>,
        capacity_hint: Option<usize>,
        expiry: Option<ExpiryPolicy>,
        stats_enabled: bool,
        hash_builder: ahash::RandomState,
    ) -> Self {
        let entries = match capacity_hint {
            Some(capacity) => HashMap::with_capacity_and_hasher(capacity, hash_builder),
            None => HashMap::with_hasher(hash_builder),
        };

        Self {
            entries,
            lru: LruTracker::new(),
            counters: Counters::new(stats_enabled),
            limit,
            expiry,
        }
    }

    // == Insert ==
    /// Stores a key-value pair, returning the previous unexpired value if
    /// the key was already present.
    ///
    /// When the shard is at capacity, expired entries are purged first; if
    /// that is not enough, the least recently used entry is evicted. A limit
    /// of zero makes the shard permanently empty.
    pub fn insert(&mut self, key: K, value: V, now: Instant) -> Option<V> {
        if self.limit == Some(0) {
            return None;
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            let expired = entry.is_expired(self.expiry.as_ref(), now);
            let previous = entry.replace(value, now);
            self.lru.touch(&key);

            return if expired {
                // The old value had already timed out; the write reclaimed it.
                self.counters.record_eviction();
                None
            } else {
                Some(previous)
            };
        }

        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                self.purge_expired(now);
            }
            while self.entries.len() >= limit {
                match self.lru.evict_oldest() {
                    Some(victim) => {
                        self.entries.remove(&victim);
                        self.counters.record_eviction();
                    }
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.lru.touch(&key);
        None
    }

    // == Get ==
    /// Retrieves the value for `key` if present and not expired.
    ///
    /// An expired entry found on the way is removed (lazy expiry) and the
    /// lookup counts as a miss. A hit refreshes the entry's access
    /// timestamp and recency position. Records exactly one hit or miss.
    pub fn get(&mut self, key: &K, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.expiry.as_ref(), now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.counters.record_miss();
            self.counters.record_eviction();
            return None;
        }

        let value = match self.entries.get_mut(key) {
            Some(entry) => {
                entry.record_access(now);
                entry.value.clone()
            }
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        self.lru.touch(key);
        self.counters.record_hit();
        Some(value)
    }

    // == Contains ==
    /// True iff an unexpired entry exists for `key`.
    ///
    /// This is a pure peek: it never refreshes the access timestamp (which
    /// would defeat after-access expiry) and records no statistics.
    pub fn contains_key(&self, key: &K, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.expiry.as_ref(), now))
    }

    // == Remove ==
    /// Removes an entry by key; no-op if absent. Explicit removal is not an
    /// eviction and is never counted as one.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key)?;
        self.lru.remove(key);
        Some(removed.value)
    }

    // == Clear ==
    /// Drops every entry in the shard.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Purge Expired ==
    /// Removes every expired entry, counting each as an eviction.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let Some(policy) = self.expiry else {
            return 0;
        };

        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(Some(&policy), now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
            self.counters.record_eviction();
        }

        expired_keys.len()
    }

    // == Remove Matching ==
    /// Removes every entry whose value satisfies the predicate, under the
    /// shard lock (snapshot-then-remove). Returns the number removed.
    pub fn remove_matching<F>(&mut self, predicate: &F) -> usize
    where
        F: Fn(&V) -> bool,
    {
        let matching_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| predicate(&entry.value))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        matching_keys.len()
    }

    // == Length ==
    /// Raw entry count, including expired-but-not-yet-purged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }
}
