//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.
//!
//! Counters are cumulative since construction and never decrease; the only
//! way to reset them is to recreate the cache. When statistics are disabled
//! recording is a no-op and every snapshot reads zero.

use serde::Serialize;

// == Cache Stats ==
/// Read-only snapshot of the cache's cumulative performance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that returned an unexpired value
    pub hit_count: u64,
    /// Number of lookups that found nothing, or only an expired entry
    pub miss_count: u64,
    /// Number of entries removed by the size bound or by expiry
    pub eviction_count: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Ratio of hits to total lookups, or 0.0 if nothing was looked up yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    /// Total number of lookups recorded.
    pub fn request_count(&self) -> u64 {
        self.hit_count + self.miss_count
    }
}

// == Counters ==
/// Per-shard mutable counters, guarded by the owning shard's lock.
#[derive(Debug)]
pub(crate) struct Counters {
    enabled: bool,
    hit_count: u64,
    miss_count: u64,
    eviction_count: u64,
}

impl Counters {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
        }
    }

    pub fn record_hit(&mut self) {
        if self.enabled {
            self.hit_count += 1;
        }
    }

    pub fn record_miss(&mut self) {
        if self.enabled {
            self.miss_count += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        if self.enabled {
            self.eviction_count += 1;
        }
    }

    /// Adds this shard's counters into an aggregate snapshot.
    pub fn add_to(&self, stats: &mut CacheStats) {
        stats.hit_count += self.hit_count;
        stats.miss_count += self.miss_count;
        stats.eviction_count += self.eviction_count;
    }
}
