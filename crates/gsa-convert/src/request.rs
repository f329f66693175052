//! AllocationRequest ⇄ GameServerAllocation spec conversions.
//!
//! The two directions are deliberately not mirror images. Going inward,
//! the wire's `preferredGameServerSelectors` and `gameServerSelectors`
//! land in separate spec fields. Going outward, the spec's `selectors` are
//! folded back into the deprecated preferred/required pair so that peers
//! which only understand the legacy fields still see the same intent
//! during mixed-version multi-cluster allocation.

use gsa_core::{
    Feature, FeatureGates, GameServerAllocation, GameServerAllocationSpec, MetaPatch,
    MultiClusterSetting, ObjectMeta,
};
use gsa_wire::{self as wire, AllocationRequest};
use tracing::debug;

use crate::priority::{priorities_to_internal, priorities_to_wire};
use crate::scheduling::{scheduling_to_internal, scheduling_to_wire};
use crate::selector::{
    label_selector_to_internal, label_selector_to_wire, selector_to_internal,
    selectors_to_internal, selectors_to_wire,
};

/// Convert a wire [`AllocationRequest`] to a [`GameServerAllocation`].
///
/// `None` in, `None` out. Never fails: missing fields are left at their
/// defaults.
pub fn request_to_allocation(
    input: Option<&AllocationRequest>,
    gates: &FeatureGates,
) -> Option<GameServerAllocation> {
    let input = input?;

    let mut gsa = GameServerAllocation {
        metadata: ObjectMeta {
            namespace: input.namespace.clone(),
            ..ObjectMeta::default()
        },
        spec: GameServerAllocationSpec {
            preferred: selectors_to_internal(input.preferred_game_server_selectors.as_deref(), gates),
            selectors: selectors_to_internal(input.game_server_selectors.as_deref(), gates),
            scheduling: scheduling_to_internal(input.scheduling),
            ..GameServerAllocationSpec::default()
        },
        ..GameServerAllocation::default()
    };

    if let Some(mcs) = &input.multi_cluster_setting {
        gsa.spec.multi_cluster_setting = MultiClusterSetting {
            enabled: mcs.enabled,
            policy_selector: label_selector_to_internal(mcs.policy_selector.as_ref())
                .unwrap_or_default(),
        };
    }

    // Accept both metadata and the deprecated metaPatch until metaPatch is removed.
    if let Some(metadata) = input.metadata.as_ref().or(input.meta_patch.as_ref()) {
        gsa.spec.metadata = MetaPatch {
            labels: metadata.labels.clone(),
            annotations: metadata.annotations.clone(),
        };
    }

    if let Some(required) = selector_to_internal(input.required_game_server_selector.as_ref(), gates) {
        gsa.spec.required = required;
    }

    if gates.enabled(Feature::CountsAndLists) && input.priorities.is_some() {
        gsa.spec.priorities = priorities_to_internal(input.priorities.as_deref());
    }

    debug!(
        namespace = %gsa.metadata.namespace,
        scheduling = %gsa.spec.scheduling,
        selectors = gsa.spec.selectors.as_ref().map_or(0, Vec::len),
        preferred = gsa.spec.preferred.as_ref().map_or(0, Vec::len),
        "converted allocation request to GameServerAllocation"
    );

    Some(gsa)
}

/// Convert a [`GameServerAllocation`] to a wire [`AllocationRequest`].
///
/// `spec.selectors` becomes `gameServerSelectors` and is also folded into
/// the deprecated fields: every selector but the last goes to
/// `preferredGameServerSelectors`, the last one to
/// `requiredGameServerSelector`. Metadata is written to both `metadata`
/// and the deprecated `metaPatch`.
pub fn allocation_to_request(
    input: Option<&GameServerAllocation>,
    gates: &FeatureGates,
) -> Option<AllocationRequest> {
    let input = input?;
    let spec = &input.spec;

    let metadata = wire::MetaPatch {
        labels: spec.metadata.labels.clone(),
        annotations: spec.metadata.annotations.clone(),
    };
    let selectors = selectors_to_wire(spec.selectors.as_deref(), gates);
    let (preferred, required) = match selectors.as_deref().and_then(<[_]>::split_last) {
        Some((last, rest)) => (Some(rest.to_vec()), Some(last.clone())),
        None => (None, None),
    };

    let policy_selector = if spec.multi_cluster_setting.enabled {
        label_selector_to_wire(Some(&spec.multi_cluster_setting.policy_selector))
    } else {
        None
    };

    let mut out = AllocationRequest {
        namespace: input.metadata.namespace.clone(),
        multi_cluster_setting: Some(wire::MultiClusterSetting {
            enabled: spec.multi_cluster_setting.enabled,
            policy_selector,
        }),
        required_game_server_selector: required,
        preferred_game_server_selectors: preferred,
        game_server_selectors: selectors,
        // Double write so a peer cluster that only knows one of the two
        // fields still receives the patch.
        metadata: Some(metadata.clone()),
        meta_patch: Some(metadata),
        ..AllocationRequest::default()
    };
    out.set_scheduling(scheduling_to_wire(spec.scheduling));

    if gates.enabled(Feature::CountsAndLists) && spec.priorities.is_some() {
        out.priorities = priorities_to_wire(spec.priorities.as_deref());
    }

    debug!(
        namespace = %out.namespace,
        selectors = out.game_server_selectors.as_ref().map_or(0, Vec::len),
        multi_cluster = spec.multi_cluster_setting.enabled,
        "converted GameServerAllocation to allocation request"
    );

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsa_core::{GameServerSelector, LabelSelector, Priority, SchedulingStrategy};
    use std::collections::HashMap;

    fn labels(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn wire_fleet(name: &str) -> wire::GameServerSelector {
        wire::GameServerSelector {
            match_labels: labels(&[("agones.dev/fleet", name)]),
            ..Default::default()
        }
    }

    fn fleet(name: &str) -> GameServerSelector {
        GameServerSelector::with_labels([("agones.dev/fleet", name)])
    }

    fn allocation_with_selectors(selectors: Option<Vec<GameServerSelector>>) -> GameServerAllocation {
        GameServerAllocation {
            spec: GameServerAllocationSpec {
                selectors,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn none_in_none_out() {
        let gates = FeatureGates::default();
        assert!(request_to_allocation(None, &gates).is_none());
        assert!(allocation_to_request(None, &gates).is_none());
    }

    #[test]
    fn copies_namespace_scheduling_and_selectors() {
        let mut req = AllocationRequest {
            namespace: "games".to_string(),
            preferred_game_server_selectors: Some(vec![wire_fleet("warm")]),
            game_server_selectors: Some(vec![wire_fleet("a"), wire_fleet("b")]),
            ..Default::default()
        };
        req.set_scheduling(wire::SchedulingStrategy::Distributed);

        let gsa = request_to_allocation(Some(&req), &FeatureGates::none()).unwrap();
        assert_eq!(gsa.namespace(), "games");
        assert_eq!(gsa.spec.scheduling, SchedulingStrategy::Distributed);
        assert_eq!(gsa.spec.preferred, Some(vec![fleet("warm")]));
        assert_eq!(gsa.spec.selectors.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn empty_wire_selectors_become_none() {
        let req = AllocationRequest {
            game_server_selectors: Some(vec![]),
            preferred_game_server_selectors: Some(vec![]),
            ..Default::default()
        };
        let gsa = request_to_allocation(Some(&req), &FeatureGates::default()).unwrap();
        assert!(gsa.spec.selectors.is_none());
        assert!(gsa.spec.preferred.is_none());
    }

    #[test]
    fn legacy_required_overwrites_default() {
        let req = AllocationRequest {
            required_game_server_selector: Some(wire_fleet("legacy")),
            ..Default::default()
        };
        let gsa = request_to_allocation(Some(&req), &FeatureGates::none()).unwrap();
        assert_eq!(gsa.spec.required, fleet("legacy"));

        let gsa = request_to_allocation(Some(&AllocationRequest::default()), &FeatureGates::none())
            .unwrap();
        assert_eq!(gsa.spec.required, GameServerSelector::default());
    }

    #[test]
    fn metadata_wins_over_meta_patch() {
        let req = AllocationRequest {
            metadata: Some(wire::MetaPatch {
                labels: labels(&[("from", "metadata")]),
                annotations: None,
            }),
            meta_patch: Some(wire::MetaPatch {
                labels: labels(&[("from", "metapatch")]),
                annotations: labels(&[("ignored", "yes")]),
            }),
            ..Default::default()
        };
        let gsa = request_to_allocation(Some(&req), &FeatureGates::default()).unwrap();
        assert_eq!(gsa.spec.metadata.labels, labels(&[("from", "metadata")]));
        assert!(gsa.spec.metadata.annotations.is_none());
    }

    #[test]
    fn meta_patch_is_fallback() {
        let patch = wire::MetaPatch {
            labels: labels(&[("team", "red")]),
            annotations: labels(&[("note", "hi")]),
        };
        let legacy = AllocationRequest {
            meta_patch: Some(patch.clone()),
            ..Default::default()
        };
        let modern = AllocationRequest {
            metadata: Some(patch),
            ..Default::default()
        };
        let gates = FeatureGates::default();
        assert_eq!(
            request_to_allocation(Some(&legacy), &gates).unwrap().spec.metadata,
            request_to_allocation(Some(&modern), &gates).unwrap().spec.metadata
        );
    }

    #[test]
    fn multi_cluster_setting_copied_when_present() {
        let req = AllocationRequest {
            multi_cluster_setting: Some(wire::MultiClusterSetting {
                enabled: true,
                policy_selector: Some(wire::LabelSelector {
                    match_labels: labels(&[("cluster", "eu")]),
                }),
            }),
            ..Default::default()
        };
        let gsa = request_to_allocation(Some(&req), &FeatureGates::default()).unwrap();
        assert!(gsa.spec.multi_cluster_setting.enabled);
        assert_eq!(
            gsa.spec.multi_cluster_setting.policy_selector.match_labels,
            labels(&[("cluster", "eu")])
        );

        let gsa = request_to_allocation(Some(&AllocationRequest::default()), &FeatureGates::default())
            .unwrap();
        assert_eq!(gsa.spec.multi_cluster_setting, MultiClusterSetting::default());
    }

    #[test]
    fn priorities_follow_counts_and_lists_gate() {
        let req = AllocationRequest {
            priorities: Some(vec![wire::Priority {
                priority_type: "Counter".to_string(),
                key: "rooms".to_string(),
                order: "Ascending".to_string(),
            }]),
            ..Default::default()
        };

        let on = FeatureGates::none().with(Feature::CountsAndLists, true);
        let gsa = request_to_allocation(Some(&req), &on).unwrap();
        assert_eq!(gsa.spec.priorities.as_ref().map(Vec::len), Some(1));

        let gsa = request_to_allocation(Some(&req), &FeatureGates::none()).unwrap();
        assert!(gsa.spec.priorities.is_none());

        let empty = AllocationRequest {
            priorities: Some(vec![]),
            ..Default::default()
        };
        let gsa = request_to_allocation(Some(&empty), &on).unwrap();
        assert!(gsa.spec.priorities.is_none());
    }

    #[test]
    fn folds_selectors_into_legacy_fields() {
        let gsa = allocation_with_selectors(Some(vec![fleet("a"), fleet("b"), fleet("c")]));
        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();

        assert_eq!(req.game_server_selectors.as_ref().map(Vec::len), Some(3));
        assert_eq!(
            req.preferred_game_server_selectors,
            Some(vec![wire_fleet("a"), wire_fleet("b")])
        );
        assert_eq!(req.required_game_server_selector, Some(wire_fleet("c")));
    }

    #[test]
    fn single_selector_folds_to_required_only() {
        let gsa = allocation_with_selectors(Some(vec![fleet("only")]));
        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();

        assert_eq!(req.preferred_game_server_selectors, Some(vec![]));
        assert_eq!(req.required_game_server_selector, Some(wire_fleet("only")));
    }

    #[test]
    fn empty_and_absent_selectors_leave_legacy_fields_unset() {
        let gates = FeatureGates::default();

        let req = allocation_to_request(Some(&allocation_with_selectors(Some(vec![]))), &gates).unwrap();
        assert_eq!(req.game_server_selectors, Some(vec![]));
        assert!(req.preferred_game_server_selectors.is_none());
        assert!(req.required_game_server_selector.is_none());

        let req = allocation_to_request(Some(&allocation_with_selectors(None)), &gates).unwrap();
        assert!(req.game_server_selectors.is_none());
        assert!(req.preferred_game_server_selectors.is_none());
        assert!(req.required_game_server_selector.is_none());
    }

    #[test]
    fn folding_ignores_spec_preferred_and_required() {
        let gsa = GameServerAllocation {
            spec: GameServerAllocationSpec {
                preferred: Some(vec![fleet("old-preferred")]),
                required: fleet("old-required"),
                ..Default::default()
            },
            ..Default::default()
        };
        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();
        assert!(req.preferred_game_server_selectors.is_none());
        assert!(req.required_game_server_selector.is_none());
    }

    #[test]
    fn metadata_is_double_written() {
        let gsa = GameServerAllocation {
            spec: GameServerAllocationSpec {
                metadata: MetaPatch {
                    labels: labels(&[("team", "blue")]),
                    annotations: labels(&[("owner", "matchmaker")]),
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();
        assert!(req.metadata.is_some());
        assert_eq!(req.metadata, req.meta_patch);
        assert_eq!(req.metadata.unwrap().labels, labels(&[("team", "blue")]));
    }

    #[test]
    fn policy_selector_only_when_multi_cluster_enabled() {
        let mut gsa = GameServerAllocation::default();
        gsa.spec.multi_cluster_setting = MultiClusterSetting {
            enabled: false,
            policy_selector: LabelSelector {
                match_labels: labels(&[("cluster", "us")]),
            },
        };

        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();
        let mcs = req.multi_cluster_setting.unwrap();
        assert!(!mcs.enabled);
        assert!(mcs.policy_selector.is_none());

        gsa.spec.multi_cluster_setting.enabled = true;
        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();
        let mcs = req.multi_cluster_setting.unwrap();
        assert!(mcs.enabled);
        assert_eq!(mcs.policy_selector.unwrap().match_labels, labels(&[("cluster", "us")]));
    }

    #[test]
    fn outbound_priorities_follow_gate() {
        let mut gsa = GameServerAllocation::default();
        gsa.spec.priorities = Some(vec![Priority {
            priority_type: "List".to_string(),
            key: "players".to_string(),
            order: "Descending".to_string(),
        }]);

        let req = allocation_to_request(Some(&gsa), &FeatureGates::all()).unwrap();
        assert_eq!(req.priorities.unwrap()[0].key, "players");

        let req = allocation_to_request(Some(&gsa), &FeatureGates::none()).unwrap();
        assert!(req.priorities.is_none());
    }

    #[test]
    fn outbound_scheduling_and_namespace() {
        let mut gsa = GameServerAllocation::default();
        gsa.metadata.namespace = "arena".to_string();
        gsa.spec.scheduling = SchedulingStrategy::Distributed;

        let req = allocation_to_request(Some(&gsa), &FeatureGates::default()).unwrap();
        assert_eq!(req.namespace, "arena");
        assert_eq!(req.scheduling(), wire::SchedulingStrategy::Distributed);
    }
}
