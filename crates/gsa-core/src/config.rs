//! gsa.toml configuration for the converter.
//!
//! ```toml
//! log_filter = "gsa=debug"
//!
//! [feature_gates]
//! PlayerAllocationFilter = true
//! CountsAndLists = false
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigResult;
use crate::features::{Feature, FeatureGates};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Gate overrides keyed by feature name. Unlisted gates keep their default.
    #[serde(default)]
    pub feature_gates: BTreeMap<String, bool>,
}

impl ConverterConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configured overrides on top of the default gates.
    pub fn feature_gates(&self) -> ConfigResult<FeatureGates> {
        let mut gates = FeatureGates::default();
        for (name, enabled) in &self.feature_gates {
            let feature: Feature = name.parse()?;
            gates = gates.with(feature, *enabled);
        }
        tracing::debug!(%gates, "resolved feature gates from config");
        Ok(gates)
    }
}
