//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their expiry check.

use std::mem;
use std::time::Instant;

use crate::config::{ExpiryMode, ExpiryPolicy};

// == Cache Entry ==
/// A single cached value together with the timestamps expiry is measured
/// against.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was last written
    written_at: Instant,
    /// When the value was last written or read
    last_access: Instant,
}

impl<V> CacheEntry<V> {
    /// Creates a fresh entry; both timestamps start at `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            written_at: now,
            last_access: now,
        }
    }

    /// Overwrites the value and resets both timestamps, returning the
    /// previous value. A write always counts as an access.
    pub fn replace(&mut self, value: V, now: Instant) -> V {
        self.written_at = now;
        self.last_access = now;
        mem::replace(&mut self.value, value)
    }

    /// Marks the entry as read, postponing after-access expiry.
    pub fn record_access(&mut self, now: Instant) {
        self.last_access = now;
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its time-to-live as of `now`.
    ///
    /// Boundary condition: an entry is expired once the full duration has
    /// elapsed, i.e. when the elapsed time is greater than or equal to the
    /// configured time-to-live. Entries never expire without a policy.
    pub fn is_expired(&self, policy: Option<&ExpiryPolicy>, now: Instant) -> bool {
        match policy {
            Some(policy) => {
                let reference = match policy.mode {
                    ExpiryMode::AfterWrite => self.written_at,
                    ExpiryMode::AfterAccess => self.last_access,
                };
                now.duration_since(reference) >= policy.ttl
            }
            None => false,
        }
    }
}
