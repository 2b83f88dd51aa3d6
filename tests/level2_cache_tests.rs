//! Integration tests for the second-level cache contract
//!
//! Exercises the crate through its public surface the way a host
//! persistence layer would: property-bundle construction, object-id keyed
//! puts and gets, type-scoped eviction, statistics, and concurrent use.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use entity_cache::{Cache, CacheConfig, EntityState, Level2Cache, spawn_maintenance_task};

// == Test Entities ==
#[derive(Debug, Clone, PartialEq)]
struct TestState {
    entity_type: &'static str,
    supertypes: &'static [&'static str],
    payload: String,
}

impl TestState {
    fn person(payload: &str) -> Self {
        Self {
            entity_type: "Person",
            supertypes: &[],
            payload: payload.to_string(),
        }
    }

    fn student(payload: &str) -> Self {
        Self {
            entity_type: "Student",
            supertypes: &["Person"],
            payload: payload.to_string(),
        }
    }

    fn address(payload: &str) -> Self {
        Self {
            entity_type: "Address",
            supertypes: &[],
            payload: payload.to_string(),
        }
    }
}

impl EntityState for TestState {
    fn entity_type(&self) -> &str {
        self.entity_type
    }

    fn supertypes(&self) -> &[&str] {
        self.supertypes
    }
}

fn properties(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// == Host Contract ==
#[test]
fn put_get_contains_evict_lifecycle() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::new(CacheConfig::new());

    assert_eq!(cache.put(1, TestState::person("ada")), None);
    assert_eq!(cache.get(&1), Some(TestState::person("ada")));
    assert!(cache.contains_oid(&1));
    assert!(!cache.contains_oid(&2));

    let previous = cache.put(1, TestState::person("grace"));
    assert_eq!(previous, Some(TestState::person("ada")));

    cache.evict(&1);
    assert_eq!(cache.get(&1), None);
    // Evicting again is a no-op.
    cache.evict(&1);
}

#[test]
fn type_scoped_eviction_leaves_other_types_untouched() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::new(CacheConfig::new());

    for i in 0..10 {
        cache.put(i, TestState::person("p"));
    }
    for i in 10..15 {
        cache.put(i, TestState::address("a"));
    }

    let evicted = cache.evict_entity_type("Person", false);
    assert_eq!(evicted, 10);
    assert_eq!(cache.size(), 5);
    for i in 10..15 {
        assert!(cache.contains_oid(&i));
    }
}

#[test]
fn type_scoped_eviction_with_subtypes() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::new(CacheConfig::new());

    cache.put(1, TestState::person("p"));
    cache.put(2, TestState::student("s"));
    cache.put(3, TestState::address("a"));

    // Without subtypes, the student stays.
    assert_eq!(cache.evict_entity_type("Person", false), 1);
    assert!(cache.contains_oid(&2));

    cache.put(1, TestState::person("p"));

    // With subtypes, person and student both go.
    assert_eq!(cache.evict_entity_type("Person", true), 2);
    assert_eq!(cache.size(), 1);
    assert!(cache.contains_oid(&3));
}

#[test]
fn construction_from_property_bundle() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::from_properties(&properties(&[
        ("maximumSize", "3"),
        ("initialCapacityHint", "16"),
        ("statisticsEnabled", "true"),
    ]));

    for i in 0..5 {
        cache.put(i, TestState::person("p"));
    }

    assert_eq!(cache.size(), 3);
    assert_eq!(cache.stats().eviction_count, 2);
}

#[test]
fn invalid_properties_fall_back_to_defaults() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("entity_cache=warn")
        .try_init();

    // Nothing here should fail construction; the bogus values just leave
    // the cache unbounded and without expiry.
    let cache: Level2Cache<u64, TestState> = Level2Cache::from_properties(&properties(&[
        ("maximumSize", "-1"),
        ("initialCapacityHint", "many"),
        ("expiryMillis", "never"),
        ("statisticsEnabled", "1"),
    ]));

    for i in 0..100 {
        cache.put(i, TestState::person("p"));
    }
    assert_eq!(cache.size(), 100);
    assert_eq!(cache.stats().request_count(), 0);
}

#[test]
fn expiry_configured_through_properties() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::from_properties(&properties(&[
        ("expiryMillis", "100"),
        ("expiryMode", "after-write"),
    ]));

    cache.put(1, TestState::person("p"));
    assert!(cache.contains_oid(&1));

    thread::sleep(Duration::from_millis(200));
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.size(), 0);
}

#[test]
fn statistics_scenario() {
    let cache: Level2Cache<u64, TestState> =
        Level2Cache::new(CacheConfig::new().statistics_enabled(true));

    for i in 0..10 {
        cache.put(i, TestState::person("p"));
    }
    for i in 0..10 {
        assert!(cache.get(&i).is_some());
    }
    for i in 100..105 {
        assert!(cache.get(&i).is_none());
    }

    let stats = cache.stats();
    assert_eq!(stats.hit_count, 10);
    assert_eq!(stats.miss_count, 5);
    assert_eq!(stats.eviction_count, 0);
}

#[test]
fn close_releases_everything_and_is_idempotent() {
    let cache: Level2Cache<u64, TestState> = Level2Cache::new(CacheConfig::new());

    for i in 0..20 {
        cache.put(i, TestState::person("p"));
    }

    cache.close();
    assert_eq!(cache.size(), 0);

    cache.close();
    assert_eq!(cache.size(), 0);

    // The cache keeps working after close; it is best-effort, not a handle.
    cache.put(1, TestState::person("p"));
    assert!(cache.contains_oid(&1));
}

// == Concurrency ==
#[test]
fn concurrent_puts_gets_and_type_eviction() {
    let cache: Arc<Level2Cache<String, TestState>> =
        Arc::new(Level2Cache::new(CacheConfig::new()));
    let mut handles = vec![];

    for worker in 0..4 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                let oid = format!("person-{worker}-{i}");
                cache.put(oid.clone(), TestState::person("p"));
                assert!(cache.get(&oid).is_some());
            }
        }));
    }

    for worker in 0..2 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                let oid = format!("address-{worker}-{i}");
                cache.put(oid.clone(), TestState::address("a"));
            }
            cache.evict_entity_type("Person", false);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Type eviction ran concurrently with person inserts, so an unknown
    // number of persons survive; every address must.
    cache.evict_entity_type("Person", false);
    assert_eq!(cache.size(), 200);
}

// == Background Maintenance ==
#[tokio::test]
async fn maintenance_task_keeps_estimated_size_fresh() {
    let cache: Arc<Cache<u64, String>> = Arc::new(Cache::new(
        CacheConfig::new()
            .expire_after_write(Duration::from_millis(50))
            .statistics_enabled(true),
    ));

    for i in 0..10 {
        cache.insert(i, format!("value-{i}"));
    }

    let handle = spawn_maintenance_task(Arc::clone(&cache), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(cache.estimated_size(), 0);
    assert_eq!(cache.stats().eviction_count, 10);

    handle.abort();
}
