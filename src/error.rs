//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror.
//!
//! Configuration errors are deliberately non-fatal: the cache coerces
//! invalid settings to defaults and reports them through a logged warning,
//! so construction never fails.

use thiserror::Error;

// == Config Error Enum ==
/// Error raised while parsing a configuration property bundle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A property value could not be parsed into its expected type
    #[error("property '{property}' has unparseable value '{value}'")]
    InvalidProperty {
        /// Name of the offending property
        property: &'static str,
        /// The raw value as supplied by the host
        value: String,
    },
}

impl ConfigError {
    /// Creates a [`ConfigError::InvalidProperty`] for the given property and raw value.
    pub fn invalid_property(property: &'static str, value: &str) -> Self {
        ConfigError::InvalidProperty {
            property,
            value: value.to_string(),
        }
    }
}
