//! Error types for converter configuration.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading feature gates or config files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown feature gate: {0}")]
    UnknownFeature(String),

    #[error("malformed feature gate (expected Name=bool): {0}")]
    MalformedGate(String),

    #[error("invalid value for feature gate {feature}: {value}")]
    InvalidGateValue { feature: String, value: String },

    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
