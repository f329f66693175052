//! Allocation service request/response messages.
//!
//! Message-typed and repeated fields are `Option` so a decoder can report
//! whether the sender set them at all. JSON uses the camelCase field names
//! of the HTTP gateway.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::enums::{self, GameServerState, SchedulingStrategy, UnknownEnumValue};

// ── Request ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    /// Namespace the allocation is made in. Empty means the server default.
    #[serde(default)]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_cluster_setting: Option<MultiClusterSetting>,

    /// Deprecated: use `game_server_selectors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_game_server_selector: Option<GameServerSelector>,

    /// Deprecated: use `game_server_selectors`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_game_server_selectors: Option<Vec<GameServerSelector>>,

    /// Raw [`SchedulingStrategy`] number.
    #[serde(
        default,
        serialize_with = "enums::json::serialize::<SchedulingStrategy, _>",
        deserialize_with = "enums::json::deserialize::<SchedulingStrategy, _>"
    )]
    pub scheduling: i32,

    /// Deprecated: use `metadata`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_patch: Option<MetaPatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetaPatch>,

    /// Ordered selectors; the first one that matches wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_server_selectors: Option<Vec<GameServerSelector>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<Priority>>,
}

impl AllocationRequest {
    /// Decoded `scheduling`, falling back to the default for unknown numbers.
    pub fn scheduling(&self) -> SchedulingStrategy {
        SchedulingStrategy::try_from(self.scheduling).unwrap_or_default()
    }

    /// Decoded `scheduling`, reporting unknown numbers.
    pub fn try_scheduling(&self) -> Result<SchedulingStrategy, UnknownEnumValue> {
        SchedulingStrategy::try_from(self.scheduling)
    }

    pub fn set_scheduling(&mut self, value: SchedulingStrategy) {
        self.scheduling = value.into();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiClusterSetting {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<HashMap<String, String>>,
}

/// Labels and annotations to apply to the allocated game server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameServerSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<HashMap<String, String>>,

    /// Raw [`GameServerState`] number.
    #[serde(
        default,
        serialize_with = "enums::json::serialize::<GameServerState, _>",
        deserialize_with = "enums::json::deserialize::<GameServerState, _>"
    )]
    pub game_server_state: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<PlayerSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<HashMap<String, CounterSelector>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<HashMap<String, ListSelector>>,
}

impl GameServerSelector {
    /// Decoded `game_server_state`, falling back to the default for unknown numbers.
    pub fn game_server_state(&self) -> GameServerState {
        GameServerState::try_from(self.game_server_state).unwrap_or_default()
    }

    /// Decoded `game_server_state`, reporting unknown numbers.
    pub fn try_game_server_state(&self) -> Result<GameServerState, UnknownEnumValue> {
        GameServerState::try_from(self.game_server_state)
    }

    pub fn set_game_server_state(&mut self, value: GameServerState) {
        self.game_server_state = value.into();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSelector {
    #[serde(default)]
    pub min_available: u64,
    #[serde(default)]
    pub max_available: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSelector {
    #[serde(default)]
    pub min_count: i64,
    #[serde(default)]
    pub max_count: i64,
    #[serde(default)]
    pub min_available: i64,
    #[serde(default)]
    pub max_available: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSelector {
    #[serde(default)]
    pub contains_value: String,
    #[serde(default)]
    pub min_available: i64,
    #[serde(default)]
    pub max_available: i64,
}

/// Tie-break rule: `priority_type` is "Counter" or "List", `order` is
/// "Ascending" or "Descending".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    #[serde(default)]
    pub priority_type: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub order: String,
}

// ── Response ──────────────────────────────────────────────────────

/// A successful allocation. Failures travel as RPC status errors instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponse {
    #[serde(default)]
    pub game_server_name: String,
    #[serde(default)]
    pub ports: Vec<GameServerStatusPort>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub node_name: String,
    /// Cluster that served the allocation.
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameServerStatusPort {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port: i32,
}
