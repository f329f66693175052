//! gsa-core — internal GameServerAllocation types and converter configuration.
//!
//! The types in [`types`] are the in-cluster representation of an
//! allocation. [`features::FeatureGates`] is the read-only capability set
//! that decides which optional fields the converters carry across.

pub mod config;
pub mod error;
pub mod features;
pub mod types;

pub use config::ConverterConfig;
pub use error::{ConfigError, ConfigResult};
pub use features::{Feature, FeatureGates};
pub use types::*;
