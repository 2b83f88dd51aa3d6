//! LRU Tracker Module
//!
//! Implements least-recently-used tracking for cache eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for the LRU eviction strategy.
///
/// Keys are stored in a VecDeque where:
/// - Front = most recently used
/// - Back = least recently used
#[derive(Debug)]
pub(crate) struct LruTracker<K> {
    /// Order of keys by access time
    order: VecDeque<K>,
}

impl<K: Clone + Eq> LruTracker<K> {
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves it to the front).
    ///
    /// If the key is already tracked it is removed first, so a key never
    /// appears twice.
    pub fn touch(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker; no-op if it is not tracked.
    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key, or `None` if the
    /// tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Returns the number of tracked keys.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }
}
