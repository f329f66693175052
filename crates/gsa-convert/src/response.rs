//! GameServerAllocation status ⇄ AllocationResponse conversions.

use gsa_core::{
    GameServerAllocation, GameServerAllocationState, GameServerAllocationStatus,
    GameServerStatusPort,
};
use gsa_wire::{self as wire, AllocationResponse};
use tracing::{debug, warn};

use crate::error::{AllocationError, AllocationResult};

/// Convert a [`GameServerAllocation`] status to a wire [`AllocationResponse`].
///
/// Only an `Allocated` status produces a response; every other state is
/// returned as the matching [`AllocationError`]. `None` in gives `Ok(None)`.
pub fn allocation_to_response(
    input: Option<&GameServerAllocation>,
) -> AllocationResult<Option<AllocationResponse>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let status = &input.status;

    check_state(&status.state)?;

    debug!(
        game_server = %status.game_server_name,
        node = %status.node_name,
        source = %status.source,
        "converted allocation status to response"
    );

    Ok(Some(AllocationResponse {
        game_server_name: status.game_server_name.clone(),
        ports: ports_to_wire(&status.ports),
        address: status.address.clone(),
        node_name: status.node_name.clone(),
        source: status.source.clone(),
    }))
}

/// Convert a successful wire [`AllocationResponse`] back to a
/// [`GameServerAllocation`].
///
/// `source` names the cluster that answered; it is attached by the caller
/// after the response arrives, so it is taken separately from the payload.
/// The result is always `Allocated` and carries the allocation kind.
pub fn response_to_allocation(
    input: Option<&AllocationResponse>,
    source: &str,
) -> Option<GameServerAllocation> {
    let input = input?;

    let mut out = GameServerAllocation {
        status: GameServerAllocationStatus {
            state: GameServerAllocationState::Allocated,
            game_server_name: input.game_server_name.clone(),
            ports: ports_to_internal(&input.ports),
            address: input.address.clone(),
            node_name: input.node_name.clone(),
            source: source.to_string(),
        },
        ..GameServerAllocation::default()
    };
    out.set_group_version_kind();

    Some(out)
}

/// Map an allocation state to success or its failure.
pub fn check_state(state: &GameServerAllocationState) -> AllocationResult<()> {
    match state {
        GameServerAllocationState::Allocated => Ok(()),
        GameServerAllocationState::UnAllocated => Err(AllocationError::ResourceExhausted),
        GameServerAllocationState::Contention => Err(AllocationError::Aborted),
        GameServerAllocationState::Other(other) => {
            warn!(state = %other, "unrecognized allocation state");
            Err(AllocationError::Unknown {
                state: other.clone(),
            })
        }
    }
}

pub fn ports_to_wire(ports: &[GameServerStatusPort]) -> Vec<wire::GameServerStatusPort> {
    ports
        .iter()
        .map(|p| wire::GameServerStatusPort {
            name: p.name.clone(),
            port: p.port,
        })
        .collect()
}

pub fn ports_to_internal(ports: &[wire::GameServerStatusPort]) -> Vec<GameServerStatusPort> {
    ports
        .iter()
        .map(|p| GameServerStatusPort {
            name: p.name.clone(),
            port: p.port,
        })
        .collect()
}
