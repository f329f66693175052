//! Scheduling strategy conversions. `Packed` is the default both ways.

use gsa_core::SchedulingStrategy;
use gsa_wire as wire;
use tracing::warn;

/// Convert a raw wire scheduling number. Unknown numbers map to `Packed`.
pub fn scheduling_to_internal(raw: i32) -> SchedulingStrategy {
    match wire::SchedulingStrategy::try_from(raw) {
        Ok(wire::SchedulingStrategy::Packed) => SchedulingStrategy::Packed,
        Ok(wire::SchedulingStrategy::Distributed) => SchedulingStrategy::Distributed,
        Err(unknown) => {
            warn!(value = unknown.0, "unrecognized scheduling strategy, using Packed");
            SchedulingStrategy::Packed
        }
    }
}

pub fn scheduling_to_wire(input: SchedulingStrategy) -> wire::SchedulingStrategy {
    match input {
        SchedulingStrategy::Packed => wire::SchedulingStrategy::Packed,
        SchedulingStrategy::Distributed => wire::SchedulingStrategy::Distributed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_values() {
        assert_eq!(scheduling_to_internal(0), SchedulingStrategy::Packed);
        assert_eq!(scheduling_to_internal(1), SchedulingStrategy::Distributed);
        assert_eq!(
            scheduling_to_wire(SchedulingStrategy::Distributed),
            wire::SchedulingStrategy::Distributed
        );
        assert_eq!(
            scheduling_to_wire(SchedulingStrategy::Packed),
            wire::SchedulingStrategy::Packed
        );
    }

    #[test]
    fn unknown_values_default_to_packed() {
        assert_eq!(scheduling_to_internal(-1), SchedulingStrategy::Packed);
        assert_eq!(scheduling_to_internal(99), SchedulingStrategy::Packed);
    }

    #[test]
    fn default_internal_maps_to_default_wire() {
        assert_eq!(
            scheduling_to_wire(SchedulingStrategy::default()),
            wire::SchedulingStrategy::default()
        );
    }
}
