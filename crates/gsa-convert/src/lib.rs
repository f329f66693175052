//! gsa-convert — conversions between allocation wire messages and
//! GameServerAllocation resources.
//!
//! All conversions are pure functions. The only shared input is a
//! [`FeatureGates`](gsa_core::FeatureGates) reference deciding which
//! optional fields are carried across.
//!
//! # Components
//!
//! - **`selector`** — game server selectors and label selectors
//! - **`scheduling`** — Packed/Distributed strategy
//! - **`priority`** — counter/list priority rules
//! - **`request`** — `AllocationRequest` ⇄ `GameServerAllocation` spec
//! - **`response`** — `GameServerAllocation` status ⇄ `AllocationResponse`
//! - **`error`** — allocation failures and their gRPC codes

pub mod error;
pub mod priority;
pub mod request;
pub mod response;
pub mod scheduling;
pub mod selector;

pub use error::{AllocationError, AllocationResult};
pub use request::{allocation_to_request, request_to_allocation};
pub use response::{allocation_to_response, check_state, response_to_allocation};
pub use selector::{selector_to_internal, selector_to_wire};
