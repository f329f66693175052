//! Protocol enumerations.
//!
//! Enum-typed message fields are carried as their raw `i32` number, the way
//! protobuf decoders keep them, so values unknown to this build survive
//! decoding. Typed access goes through the message accessors.

use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// A raw enum number that names no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown enum value: {0}")]
pub struct UnknownEnumValue(pub i32);

/// Shared surface of protocol enums.
pub trait ProtoEnum: Sized + Copy + Into<i32> + TryFrom<i32, Error = UnknownEnumValue> {
    /// Name used in the protocol definition.
    fn as_str_name(&self) -> &'static str;

    /// Inverse of [`ProtoEnum::as_str_name`].
    fn from_str_name(name: &str) -> Option<Self>;
}

/// `AllocationRequest.scheduling`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum SchedulingStrategy {
    #[default]
    Packed = 0,
    Distributed = 1,
}

impl From<SchedulingStrategy> for i32 {
    fn from(value: SchedulingStrategy) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for SchedulingStrategy {
    type Error = UnknownEnumValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Packed),
            1 => Ok(Self::Distributed),
            other => Err(UnknownEnumValue(other)),
        }
    }
}

impl ProtoEnum for SchedulingStrategy {
    fn as_str_name(&self) -> &'static str {
        match self {
            Self::Packed => "Packed",
            Self::Distributed => "Distributed",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "Packed" => Some(Self::Packed),
            "Distributed" => Some(Self::Distributed),
            _ => None,
        }
    }
}

/// `GameServerSelector.gameServerState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum GameServerState {
    #[default]
    Ready = 0,
    Allocated = 1,
}

impl From<GameServerState> for i32 {
    fn from(value: GameServerState) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for GameServerState {
    type Error = UnknownEnumValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Ready),
            1 => Ok(Self::Allocated),
            other => Err(UnknownEnumValue(other)),
        }
    }
}

impl ProtoEnum for GameServerState {
    fn as_str_name(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Allocated => "ALLOCATED",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "READY" => Some(Self::Ready),
            "ALLOCATED" => Some(Self::Allocated),
            _ => None,
        }
    }
}

/// JSON form of enum fields: the variant name when known, else the number.
/// Both names and numbers are accepted on input.
pub(crate) mod json {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Name(String),
    }

    pub fn serialize<E: ProtoEnum, S: Serializer>(value: &i32, ser: S) -> Result<S::Ok, S::Error> {
        match E::try_from(*value) {
            Ok(known) => ser.serialize_str(known.as_str_name()),
            Err(_) => ser.serialize_i32(*value),
        }
    }

    pub fn deserialize<'de, E: ProtoEnum, D: Deserializer<'de>>(de: D) -> Result<i32, D::Error> {
        match Raw::deserialize(de)? {
            Raw::Number(n) => Ok(n),
            Raw::Name(name) => E::from_str_name(&name)
                .map(Into::<i32>::into)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown enum name: {name}"))),
        }
    }
}
