//! Game server selector conversions.
//!
//! Label matching always crosses over. Lifecycle state, player capacity
//! and counter/list filters only cross over when their feature gate is
//! enabled; otherwise the target field is left unset whatever the source
//! holds. Counter and list maps keep their presence: an empty source map
//! yields an empty target map, an absent one yields an absent one.

use gsa_core::{
    CounterSelector, Feature, FeatureGates, GameServerSelector, GameServerState, LabelSelector,
    ListSelector, PlayerSelector,
};
use gsa_wire as wire;

/// Convert a wire selector to its internal form. `None` in, `None` out.
pub fn selector_to_internal(
    input: Option<&wire::GameServerSelector>,
    gates: &FeatureGates,
) -> Option<GameServerSelector> {
    let input = input?;
    let mut result = GameServerSelector {
        match_labels: input.match_labels.clone(),
        ..GameServerSelector::default()
    };

    if gates.enabled(Feature::StateAllocationFilter) {
        result.game_server_state = match input.try_game_server_state() {
            Ok(wire::GameServerState::Ready) => Some(GameServerState::Ready),
            Ok(wire::GameServerState::Allocated) => Some(GameServerState::Allocated),
            Err(_) => None,
        };
    }

    if gates.enabled(Feature::PlayerAllocationFilter) {
        result.players = input.players.map(|p| PlayerSelector {
            min_available: p.min_available as i64,
            max_available: p.max_available as i64,
        });
    }

    if gates.enabled(Feature::CountsAndLists) {
        result.counters = input.counters.as_ref().map(|counters| {
            counters
                .iter()
                .map(|(name, c)| {
                    let counter = CounterSelector {
                        min_count: c.min_count,
                        max_count: c.max_count,
                        min_available: c.min_available,
                        max_available: c.max_available,
                    };
                    (name.clone(), counter)
                })
                .collect()
        });
        result.lists = input.lists.as_ref().map(|lists| {
            lists
                .iter()
                .map(|(name, l)| {
                    let list = ListSelector {
                        contains_value: l.contains_value.clone(),
                        min_available: l.min_available,
                        max_available: l.max_available,
                    };
                    (name.clone(), list)
                })
                .collect()
        });
    }

    Some(result)
}

/// Convert an internal selector to its wire form. `None` in, `None` out.
pub fn selector_to_wire(
    input: Option<&GameServerSelector>,
    gates: &FeatureGates,
) -> Option<wire::GameServerSelector> {
    let input = input?;
    let mut result = wire::GameServerSelector {
        match_labels: input.match_labels.clone(),
        ..wire::GameServerSelector::default()
    };

    if gates.enabled(Feature::StateAllocationFilter) {
        match input.game_server_state {
            Some(GameServerState::Ready) => result.set_game_server_state(wire::GameServerState::Ready),
            Some(GameServerState::Allocated) => {
                result.set_game_server_state(wire::GameServerState::Allocated)
            }
            // Other lifecycle states have no wire form.
            _ => {}
        }
    }

    if gates.enabled(Feature::PlayerAllocationFilter) {
        result.players = input.players.map(|p| wire::PlayerSelector {
            min_available: p.min_available as u64,
            max_available: p.max_available as u64,
        });
    }

    if gates.enabled(Feature::CountsAndLists) {
        result.counters = input.counters.as_ref().map(|counters| {
            counters
                .iter()
                .map(|(name, c)| {
                    let counter = wire::CounterSelector {
                        min_count: c.min_count,
                        max_count: c.max_count,
                        min_available: c.min_available,
                        max_available: c.max_available,
                    };
                    (name.clone(), counter)
                })
                .collect()
        });
        result.lists = input.lists.as_ref().map(|lists| {
            lists
                .iter()
                .map(|(name, l)| {
                    let list = wire::ListSelector {
                        contains_value: l.contains_value.clone(),
                        min_available: l.min_available,
                        max_available: l.max_available,
                    };
                    (name.clone(), list)
                })
                .collect()
        });
    }

    Some(result)
}

/// Convert a wire selector sequence.
///
/// Yields `None` for an absent *or empty* sequence: nothing is collected
/// unless at least one selector is present.
pub fn selectors_to_internal(
    input: Option<&[wire::GameServerSelector]>,
    gates: &FeatureGates,
) -> Option<Vec<GameServerSelector>> {
    let selectors: Vec<GameServerSelector> = input?
        .iter()
        .filter_map(|s| selector_to_internal(Some(s), gates))
        .collect();
    (!selectors.is_empty()).then_some(selectors)
}

/// Convert an internal selector sequence, keeping an empty sequence empty
/// and an absent one absent.
pub fn selectors_to_wire(
    input: Option<&[GameServerSelector]>,
    gates: &FeatureGates,
) -> Option<Vec<wire::GameServerSelector>> {
    input.map(|selectors| {
        selectors
            .iter()
            .filter_map(|s| selector_to_wire(Some(s), gates))
            .collect()
    })
}

pub fn label_selector_to_internal(input: Option<&wire::LabelSelector>) -> Option<LabelSelector> {
    input.map(|ls| LabelSelector {
        match_labels: ls.match_labels.clone(),
    })
}

pub fn label_selector_to_wire(input: Option<&LabelSelector>) -> Option<wire::LabelSelector> {
    input.map(|ls| wire::LabelSelector {
        match_labels: ls.match_labels.clone(),
    })
}
