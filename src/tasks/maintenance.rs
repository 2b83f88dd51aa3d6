//! Maintenance Task
//!
//! Background task that periodically purges expired cache entries.
//!
//! Inline lazy expiry already keeps the cache correct; this task bounds how
//! long expired entries can linger (and how stale [`Cache::estimated_size`]
//! can get) on caches that are written rarely.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Cache;

/// Spawns a background task that runs a full expiry sweep every `interval`.
///
/// The task loops until aborted; keep the returned handle and call
/// [`JoinHandle::abort`] during shutdown.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use entity_cache::{Cache, CacheConfig, spawn_maintenance_task};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache: Arc<Cache<u64, String>> = Arc::new(Cache::new(
///     CacheConfig::new().expire_after_write(Duration::from_secs(60)),
/// ));
/// let handle = spawn_maintenance_task(Arc::clone(&cache), Duration::from_secs(5));
/// // ... later, during shutdown:
/// handle.abort();
/// # }
/// ```
pub fn spawn_maintenance_task<K, V>(cache: Arc<Cache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Clone + Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "starting cache maintenance task");

        loop {
            tokio::time::sleep(interval).await;

            let purged = cache.run_maintenance();
            if purged > 0 {
                info!(purged, "maintenance sweep purged expired entries");
            } else {
                debug!("maintenance sweep found no expired entries");
            }
        }
    })
}
