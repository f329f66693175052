//! Internal `GameServerAllocation` resource types.
//!
//! These mirror the cluster resource consumed by the in-cluster allocator:
//! a spec describing what to allocate and a status describing the outcome.
//! Fields whose absence carries meaning (selector lists, label maps,
//! counter/list filters, priorities) are `Option` so that "not configured"
//! and "configured but empty" stay distinguishable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// API group of the allocation resource.
pub const GROUP: &str = "allocation.agones.dev";

/// API version of the allocation resource.
pub const VERSION: &str = "v1";

/// Kind name stamped onto allocation objects.
pub const KIND: &str = "GameServerAllocation";

/// Label/annotation map as stored on cluster objects.
pub type StringMap = HashMap<String, String>;

// ── Object metadata ───────────────────────────────────────────────

/// `apiVersion` / `kind` discriminator shared by all cluster objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

/// Subset of object metadata the allocator cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// Label selector with exact-match semantics only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<StringMap>,
}

// ── Allocation resource ───────────────────────────────────────────

/// A request to allocate a game server, together with its outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameServerAllocation {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: GameServerAllocationSpec,
    #[serde(default)]
    pub status: GameServerAllocationStatus,
}

impl GameServerAllocation {
    /// Namespace the allocation is scoped to.
    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    /// Stamp the allocation group/version/kind onto this object.
    pub fn set_group_version_kind(&mut self) {
        self.type_meta = TypeMeta {
            api_version: format!("{GROUP}/{VERSION}"),
            kind: KIND.to_string(),
        };
    }

    /// Whether this object carries the allocation group/version/kind.
    pub fn is_allocation_kind(&self) -> bool {
        self.type_meta.kind == KIND && self.type_meta.api_version == format!("{GROUP}/{VERSION}")
    }
}

/// What to allocate and how.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameServerAllocationSpec {
    #[serde(default)]
    pub multi_cluster_setting: MultiClusterSetting,
    /// Deprecated single required selector.
    #[serde(default)]
    pub required: GameServerSelector,
    /// Deprecated preferred selectors, tried before `required`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<Vec<GameServerSelector>>,
    /// Ordered selectors; the first one that matches wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<GameServerSelector>>,
    #[serde(default)]
    pub scheduling: SchedulingStrategy,
    /// Labels/annotations applied to the allocated game server.
    #[serde(default)]
    pub metadata: MetaPatch,
    /// Tie-break ordering among matching game servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<Priority>>,
}

/// Multi-cluster fan-out configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MultiClusterSetting {
    #[serde(default)]
    pub enabled: bool,
    /// Selects the allocation policies to apply. Only meaningful when `enabled`.
    #[serde(default)]
    pub policy_selector: LabelSelector,
}

/// Metadata patch applied to the allocated game server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<StringMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<StringMap>,
}

/// How candidate game servers are spread across nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulingStrategy {
    /// Fill the most-used nodes first.
    #[default]
    Packed,
    /// Spread allocations across nodes.
    Distributed,
}

impl fmt::Display for SchedulingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packed => f.write_str("Packed"),
            Self::Distributed => f.write_str("Distributed"),
        }
    }
}

// ── Selectors ─────────────────────────────────────────────────────

/// Predicate over game servers eligible for allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameServerSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<StringMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_server_state: Option<GameServerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<PlayerSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<HashMap<String, CounterSelector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<HashMap<String, ListSelector>>,
}

impl GameServerSelector {
    /// Selector matching on labels only.
    pub fn with_labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            match_labels: Some(labels.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            ..Self::default()
        }
    }
}

/// Lifecycle state of a game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameServerState {
    PortAllocation,
    Creating,
    Starting,
    Scheduled,
    RequestReady,
    Ready,
    Shutdown,
    Error,
    Unhealthy,
    Reserved,
    Allocated,
}

/// Range filter on available player capacity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSelector {
    #[serde(default)]
    pub min_available: i64,
    #[serde(default)]
    pub max_available: i64,
}

/// Filter on a named counter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
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

/// Filter on a named list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListSelector {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contains_value: String,
    #[serde(default)]
    pub min_available: i64,
    #[serde(default)]
    pub max_available: i64,
}

// ── Priorities ────────────────────────────────────────────────────

/// `priorityType` value for counter priorities.
pub const PRIORITY_TYPE_COUNTER: &str = "Counter";
/// `priorityType` value for list priorities.
pub const PRIORITY_TYPE_LIST: &str = "List";
/// `order` value for ascending priorities.
pub const PRIORITY_ORDER_ASCENDING: &str = "Ascending";
/// `order` value for descending priorities.
pub const PRIORITY_ORDER_DESCENDING: &str = "Descending";

/// Tie-break rule over a named counter or list.
///
/// `priority_type` and `order` are kept as their string forms; they are
/// validated by the cluster admission layer, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    #[serde(default)]
    pub priority_type: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub order: String,
}

// ── Status ────────────────────────────────────────────────────────

/// Outcome of an allocation attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameServerAllocationStatus {
    #[serde(default)]
    pub state: GameServerAllocationState,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub game_server_name: String,
    #[serde(default)]
    pub ports: Vec<GameServerStatusPort>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_name: String,
    /// Cluster that served the allocation ("local" or a remote endpoint).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

/// Named port exposed by an allocated game server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameServerStatusPort {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port: i32,
}

/// Allocation outcome.
///
/// Serialized as a plain string. Strings other than the three known states
/// (including the empty, unset state) are kept in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameServerAllocationState {
    Allocated,
    UnAllocated,
    Contention,
    Other(String),
}

impl GameServerAllocationState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allocated => "Allocated",
            Self::UnAllocated => "UnAllocated",
            Self::Contention => "Contention",
            Self::Other(s) => s,
        }
    }
}

impl Default for GameServerAllocationState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for GameServerAllocationState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Allocated" => Self::Allocated,
            "UnAllocated" => Self::UnAllocated,
            "Contention" => Self::Contention,
            _ => Self::Other(s),
        }
    }
}

impl From<GameServerAllocationState> for String {
    fn from(state: GameServerAllocationState) -> Self {
        match state {
            GameServerAllocationState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GameServerAllocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
