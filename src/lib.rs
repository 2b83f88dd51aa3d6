//! Entity Cache - a bounded in-memory second-level entity cache
//!
//! Provides a thread-safe key-value cache with TTL expiry (after-write or
//! after-access), LRU eviction under a configurable size bound, and
//! hit/miss/eviction statistics, plus the narrow [`Level2Cache`] adapter a
//! host persistence layer plugs into.
//!
//! The cache is purely in-process and best-effort: losing its contents
//! never affects correctness, only performance.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use entity_cache::{Cache, CacheConfig};
//!
//! let cache = Cache::new(
//!     CacheConfig::new()
//!         .maximum_size(10_000)
//!         .expire_after_access(Duration::from_secs(300))
//!         .statistics_enabled(true),
//! );
//!
//! cache.insert("oid-1", "entity state");
//! assert_eq!(cache.get(&"oid-1"), Some("entity state"));
//!
//! cache.invalidate_all();
//! assert_eq!(cache.size(), 0);
//! assert_eq!(cache.stats().hit_count, 1);
//! ```

pub mod cache;
pub mod config;
pub mod entity;
pub mod error;
pub mod level2;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::{CacheConfig, ExpiryMode};
pub use entity::EntityState;
pub use error::ConfigError;
pub use level2::Level2Cache;
pub use tasks::spawn_maintenance_task;
