//! Configuration Module
//!
//! Translates the host's configuration properties into cache options.
//!
//! Invalid or out-of-range values never fail construction: the affected
//! feature is simply left unconfigured and a warning is emitted. This
//! mirrors how the host persistence layer treats optional cache settings.

use std::collections::HashMap;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

// == Property Names ==
/// Maximum number of live entries (absent = unbounded, 0 = always-empty).
pub const PROPERTY_MAX_SIZE: &str = "maximumSize";
/// Initial capacity hint for the underlying storage.
pub const PROPERTY_INITIAL_CAPACITY: &str = "initialCapacityHint";
/// Entry time-to-live in milliseconds (absent or non-positive = no expiry).
pub const PROPERTY_EXPIRY_MILLIS: &str = "expiryMillis";
/// Expiry mode: `"after-access"` or `"after-write"`.
pub const PROPERTY_EXPIRY_MODE: &str = "expiryMode";
/// Whether hit/miss/eviction statistics are recorded.
pub const PROPERTY_STATISTICS_ENABLED: &str = "statisticsEnabled";

const EXPIRY_MODE_AFTER_ACCESS: &str = "after-access";
const EXPIRY_MODE_AFTER_WRITE: &str = "after-write";

// == Expiry Mode ==
/// Policy determining which timestamp governs an entry's time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryMode {
    /// Entry expires a fixed duration after its last write, regardless of reads.
    AfterWrite,
    /// Entry expires a fixed duration after its most recent read or write.
    AfterAccess,
}

// == Expiry Policy ==
/// A time-to-live paired with the mode that governs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Duration after which an entry is considered expired.
    pub ttl: Duration,
    /// Which timestamp the duration is measured against.
    pub mode: ExpiryMode,
}

// == Cache Config ==
/// Immutable set of cache options, fixed at construction.
///
/// Build one with the fluent methods, or derive one from a host property
/// bundle with [`CacheConfig::from_properties`].
///
/// # Example
/// ```
/// use std::time::Duration;
/// use entity_cache::CacheConfig;
///
/// let config = CacheConfig::new()
///     .maximum_size(10_000)
///     .expire_after_access(Duration::from_secs(300))
///     .statistics_enabled(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    max_size: Option<usize>,
    capacity_hint: Option<usize>,
    expiry: Option<ExpiryPolicy>,
    stats_enabled: bool,
}

impl CacheConfig {
    /// Creates a config with everything unconfigured: unbounded size,
    /// no expiry, statistics disabled.
    pub fn new() -> Self {
        Self::default()
    }

    // == Builder Methods ==
    /// Bounds the cache to at most `max` live entries. Zero yields an
    /// always-empty cache.
    pub fn maximum_size(mut self, max: usize) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Sizes the underlying storage for roughly `capacity` entries up front.
    ///
    /// A zero hint is meaningless and is ignored with a warning.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        if capacity == 0 {
            warn!("ignoring initial capacity hint of 0");
            return self;
        }
        self.capacity_hint = Some(capacity);
        self
    }

    /// Expires entries a fixed `ttl` after their last write.
    ///
    /// A zero duration would expire everything immediately and is ignored
    /// with a warning.
    pub fn expire_after_write(self, ttl: Duration) -> Self {
        self.expire_after(ttl, ExpiryMode::AfterWrite)
    }

    /// Expires entries a fixed `ttl` after their most recent read or write.
    ///
    /// A zero duration would expire everything immediately and is ignored
    /// with a warning.
    pub fn expire_after_access(self, ttl: Duration) -> Self {
        self.expire_after(ttl, ExpiryMode::AfterAccess)
    }

    fn expire_after(mut self, ttl: Duration, mode: ExpiryMode) -> Self {
        if ttl.is_zero() {
            warn!(?mode, "ignoring zero expiry duration");
            return self;
        }
        self.expiry = Some(ExpiryPolicy { ttl, mode });
        self
    }

    /// Enables or disables hit/miss/eviction statistics recording.
    pub fn statistics_enabled(mut self, enabled: bool) -> Self {
        self.stats_enabled = enabled;
        self
    }

    // == Property Bundle Parsing ==
    /// Derives a config from the host's property bundle.
    ///
    /// Recognized keys are [`PROPERTY_MAX_SIZE`], [`PROPERTY_INITIAL_CAPACITY`],
    /// [`PROPERTY_EXPIRY_MILLIS`], [`PROPERTY_EXPIRY_MODE`] and
    /// [`PROPERTY_STATISTICS_ENABLED`]; unknown keys are ignored.
    ///
    /// Absent or invalid values disable the corresponding feature instead of
    /// failing; each coercion is reported through a warning. If a positive
    /// expiry is configured without a recognizable mode, the mode defaults
    /// to after-access.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut config = CacheConfig::new();

        match int_property(properties, PROPERTY_MAX_SIZE) {
            Ok(Some(max)) if max >= 0 => config.max_size = Some(max as usize),
            Ok(Some(max)) => warn!(
                property = PROPERTY_MAX_SIZE,
                value = max,
                "negative maximum size, leaving cache unbounded"
            ),
            Ok(None) => {}
            Err(err) => warn!(%err, "leaving cache unbounded"),
        }

        match int_property(properties, PROPERTY_INITIAL_CAPACITY) {
            Ok(Some(capacity)) if capacity > 0 => {
                config.capacity_hint = Some(capacity as usize);
            }
            Ok(Some(capacity)) => warn!(
                property = PROPERTY_INITIAL_CAPACITY,
                value = capacity,
                "non-positive initial capacity hint, ignoring"
            ),
            Ok(None) => {}
            Err(err) => warn!(%err, "ignoring initial capacity hint"),
        }

        match int_property(properties, PROPERTY_EXPIRY_MILLIS) {
            Ok(Some(millis)) if millis > 0 => {
                config.expiry = Some(ExpiryPolicy {
                    ttl: Duration::from_millis(millis as u64),
                    mode: expiry_mode_property(properties),
                });
            }
            Ok(Some(millis)) => warn!(
                property = PROPERTY_EXPIRY_MILLIS,
                value = millis,
                "non-positive expiry duration, expiry disabled"
            ),
            Ok(None) => {}
            Err(err) => warn!(%err, "expiry disabled"),
        }

        match bool_property(properties, PROPERTY_STATISTICS_ENABLED) {
            Ok(Some(enabled)) => config.stats_enabled = enabled,
            Ok(None) => {}
            Err(err) => warn!(%err, "statistics disabled"),
        }

        config
    }

    // == Accessors ==
    pub(crate) fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub(crate) fn capacity_hint(&self) -> Option<usize> {
        self.capacity_hint
    }

    pub(crate) fn expiry(&self) -> Option<ExpiryPolicy> {
        self.expiry
    }

    pub(crate) fn stats_enabled(&self) -> bool {
        self.stats_enabled
    }
}

// == Parsing Helpers ==
fn int_property(
    properties: &HashMap<String, String>,
    property: &'static str,
) -> Result<Option<i64>, ConfigError> {
    properties
        .get(property)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_property(property, value))
        })
        .transpose()
}

fn bool_property(
    properties: &HashMap<String, String>,
    property: &'static str,
) -> Result<Option<bool>, ConfigError> {
    properties
        .get(property)
        .map(|value| match value.trim() {
            v if v.eq_ignore_ascii_case("true") => Ok(true),
            v if v.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(ConfigError::invalid_property(property, value)),
        })
        .transpose()
}

/// Resolves the expiry mode property, defaulting to after-access with a
/// warning when it is unset or unrecognized. Only consulted once a positive
/// expiry duration has been configured.
fn expiry_mode_property(properties: &HashMap<String, String>) -> ExpiryMode {
    match properties.get(PROPERTY_EXPIRY_MODE).map(|v| v.trim()) {
        Some(v) if v.eq_ignore_ascii_case(EXPIRY_MODE_AFTER_ACCESS) => ExpiryMode::AfterAccess,
        Some(v) if v.eq_ignore_ascii_case(EXPIRY_MODE_AFTER_WRITE) => ExpiryMode::AfterWrite,
        _ => {
            warn!(
                property = PROPERTY_EXPIRY_MODE,
                assumed = EXPIRY_MODE_AFTER_ACCESS,
                "no expiry mode configured, assuming after-access"
            );
            ExpiryMode::AfterAccess
        }
    }
}
