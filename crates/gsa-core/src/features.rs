//! Feature gates controlling which optional allocation fields are converted.
//!
//! A `FeatureGates` value is built once (from defaults, a config file, or a
//! `Name=bool&Name=bool` string) and then passed by reference into every
//! conversion. It is never mutated while conversions run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// A named capability that gates optional selector/priority fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// `gameServerState` filtering on selectors.
    StateAllocationFilter,
    /// `players` filtering on selectors.
    PlayerAllocationFilter,
    /// Counter/list filters on selectors and counter/list priorities.
    CountsAndLists,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::StateAllocationFilter,
        Feature::PlayerAllocationFilter,
        Feature::CountsAndLists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateAllocationFilter => "StateAllocationFilter",
            Self::PlayerAllocationFilter => "PlayerAllocationFilter",
            Self::CountsAndLists => "CountsAndLists",
        }
    }

    /// Value used when nothing overrides the gate.
    pub fn default_enabled(&self) -> bool {
        match self {
            Self::StateAllocationFilter => true,
            Self::PlayerAllocationFilter => false,
            Self::CountsAndLists => true,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFeature(s.to_string()))
    }
}

/// Read-only set of enabled features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureGates {
    gates: BTreeMap<Feature, bool>,
}

impl Default for FeatureGates {
    fn default() -> Self {
        Self {
            gates: Feature::ALL.into_iter().map(|f| (f, f.default_enabled())).collect(),
        }
    }
}

impl FeatureGates {
    /// Gates with every feature switched off.
    pub fn none() -> Self {
        Self::from_iter(Feature::ALL.into_iter().map(|f| (f, false)))
    }

    /// Gates with every feature switched on.
    pub fn all() -> Self {
        Self::from_iter(Feature::ALL.into_iter().map(|f| (f, true)))
    }

    /// Whether `feature` is enabled. Features never set fall back to their default.
    pub fn enabled(&self, feature: Feature) -> bool {
        self.gates
            .get(&feature)
            .copied()
            .unwrap_or_else(|| feature.default_enabled())
    }

    /// Builder method: set a single gate.
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.gates.insert(feature, enabled);
        self
    }

    /// Apply every gate from `other` on top of these gates.
    pub fn merge(mut self, other: &FeatureGates) -> Self {
        self.gates.extend(other.gates.iter().map(|(f, v)| (*f, *v)));
        self
    }

    /// Parse a `Name=true&Name=false` gate string.
    ///
    /// Empty segments are ignored. Gates not mentioned keep their default.
    pub fn parse(spec: &str) -> ConfigResult<Self> {
        Ok(Self::default().merge(&Self::parse_overrides(spec)?))
    }

    /// Parse a gate string into only the gates it mentions, so it can be
    /// layered over another set with [`FeatureGates::merge`].
    pub fn parse_overrides(spec: &str) -> ConfigResult<Self> {
        let mut gates = Self {
            gates: BTreeMap::new(),
        };
        for pair in spec.split('&').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedGate(pair.to_string()))?;
            let feature: Feature = name.trim().parse()?;
            let enabled: bool = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidGateValue {
                    feature: feature.to_string(),
                    value: value.trim().to_string(),
                })?;
            gates.gates.insert(feature, enabled);
        }
        Ok(gates)
    }

    /// Iterate over every known feature with its effective value.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, bool)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.enabled(f)))
    }
}

impl FromIterator<(Feature, bool)> for FeatureGates {
    fn from_iter<I: IntoIterator<Item = (Feature, bool)>>(iter: I) -> Self {
        Self {
            gates: iter.into_iter().collect(),
        }
    }
}

impl FromStr for FeatureGates {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeatureGates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(|(feat, on)| format!("{feat}={on}")).collect();
        f.write_str(&rendered.join("&"))
    }
}
