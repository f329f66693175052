//! Priority list conversions.
//!
//! Plain element-wise copies in order. Absent or empty input gives `None`.
//! Whether priorities are converted at all is decided by the caller.

use gsa_core::Priority;
use gsa_wire as wire;

pub fn priorities_to_internal(input: Option<&[wire::Priority]>) -> Option<Vec<Priority>> {
    let priorities: Vec<Priority> = input?
        .iter()
        .map(|p| Priority {
            priority_type: p.priority_type.clone(),
            key: p.key.clone(),
            order: p.order.clone(),
        })
        .collect();
    (!priorities.is_empty()).then_some(priorities)
}

pub fn priorities_to_wire(input: Option<&[Priority]>) -> Option<Vec<wire::Priority>> {
    let priorities: Vec<wire::Priority> = input?
        .iter()
        .map(|p| wire::Priority {
            priority_type: p.priority_type.clone(),
            key: p.key.clone(),
            order: p.order.clone(),
        })
        .collect();
    (!priorities.is_empty()).then_some(priorities)
}
