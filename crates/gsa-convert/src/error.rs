//! Allocation failure taxonomy.
//!
//! Each failed allocation state maps to one error with a stable gRPC code.
//! The RPC layer turns these into transport statuses via `From<AllocationError>
//! for tonic::Status`.

use thiserror::Error;
use tonic::{Code, Status};

/// Result type alias for fallible conversions.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Why an allocation produced no game server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("there is no available GameServer to allocate")]
    ResourceExhausted,

    #[error("too many concurrent requests have overwhelmed the system")]
    Aborted,

    /// State outside the known set. Unreachable while the state set stays
    /// closed; kept as a guard.
    #[error("unknown issue")]
    Unknown { state: String },
}

impl AllocationError {
    pub fn code(&self) -> Code {
        match self {
            Self::ResourceExhausted => Code::ResourceExhausted,
            Self::Aborted => Code::Aborted,
            Self::Unknown { .. } => Code::Unknown,
        }
    }
}

impl From<AllocationError> for Status {
    fn from(err: AllocationError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}
