//! gsa-wire — allocation service wire messages.
//!
//! The message shapes exchanged with external allocator clients and
//! between clusters during multi-cluster allocation, including the
//! deprecated fields still honored for older peers.

pub mod enums;
pub mod messages;

pub use enums::{GameServerState, ProtoEnum, SchedulingStrategy, UnknownEnumValue};
pub use messages::*;
