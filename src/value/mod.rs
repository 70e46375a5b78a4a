//! Value Module
//!
//! The value record: one tagged payload, or nothing at all (null).
//!
//! ## Responsibilities
//! - Hold exactly one scalar or collection payload, or none
//! - Typed getters/setters that assert on a tag mismatch
//! - Two-phase collection building (switch tag, then append-and-populate)
//! - Copy / move assignment and null handling
//! - Record persistence for the storage boundary (bincode)
//!
//! ## Layout
//! ```text
//! Value { payload: Option<Payload> }
//!                     │
//!      ┌──────────────┼──────────────────────────┐
//!      ▼              ▼                          ▼
//!   scalars     byte-encoded              collections
//!  (i8..f64,   (decimal, inet,          (Map { keys, values },
//!   bool, ts)   uuid, timeuuid)          Set(Vec), List(Vec))
//! ```
//!
//! Collection elements are full `Value`s owned by their parent, so nesting
//! is arbitrary but always acyclic.

mod accessors;
mod collection;
mod display;

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{QlError, Result};
use crate::types::{decimal, Timestamp, ValueType};

pub use collection::MapValue;

/// Byte length of an IPv4 address
pub(crate) const IPV4_SIZE: usize = 4;

/// Byte length of an IPv6 address
pub(crate) const IPV6_SIZE: usize = 16;

/// Byte length of a UUID
pub(crate) const UUID_SIZE: usize = 16;

// =============================================================================
// Payload
// =============================================================================

/// The active payload of a non-null value
///
/// Decimal, inet, uuid and timeuuid payloads are kept in their canonical
/// byte form so equal-typed payloads compare without decoding.
///
/// A payload becomes a [`Value`] only through the setters or the checked
/// `TryFrom<Payload>`, so byte forms that do not decode never get in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Decimal(Vec<u8>),
    Bool(bool),
    String(String),
    Timestamp(i64),
    Binary(Vec<u8>),
    Inet(Vec<u8>),
    Map(MapValue),
    Set(Vec<Value>),
    List(Vec<Value>),
    Uuid([u8; UUID_SIZE]),
    TimeUuid([u8; UUID_SIZE]),
}

impl Payload {
    pub fn value_type(&self) -> ValueType {
        match self {
            Payload::Int8(_) => ValueType::Int8,
            Payload::Int16(_) => ValueType::Int16,
            Payload::Int32(_) => ValueType::Int32,
            Payload::Int64(_) => ValueType::Int64,
            Payload::Float(_) => ValueType::Float,
            Payload::Double(_) => ValueType::Double,
            Payload::Decimal(_) => ValueType::Decimal,
            Payload::Bool(_) => ValueType::Bool,
            Payload::String(_) => ValueType::String,
            Payload::Timestamp(_) => ValueType::Timestamp,
            Payload::Binary(_) => ValueType::Binary,
            Payload::Inet(_) => ValueType::Inet,
            Payload::Map(_) => ValueType::Map,
            Payload::Set(_) => ValueType::Set,
            Payload::List(_) => ValueType::List,
            Payload::Uuid(_) => ValueType::Uuid,
            Payload::TimeUuid(_) => ValueType::TimeUuid,
        }
    }
}

// =============================================================================
// Value
// =============================================================================

/// A typed value record
///
/// Null is "no payload"; there is no sentinel. Derived equality is
/// structural (two nulls are equal); SQL comparison semantics live in the
/// comparison methods instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValueRecord")]
pub struct Value {
    payload: Option<Payload>,
}

/// Unchecked serde shape of [`Value`]; every deserialized value passes
/// through [`check_payload`] on its way in
#[derive(Deserialize)]
struct ValueRecord {
    payload: Option<Payload>,
}

impl TryFrom<ValueRecord> for Value {
    type Error = QlError;

    fn try_from(record: ValueRecord) -> Result<Self> {
        match record.payload {
            Some(payload) => Value::try_from(payload),
            None => Ok(Value::null()),
        }
    }
}

/// Checked construction from a raw payload
impl TryFrom<Payload> for Value {
    type Error = QlError;

    fn try_from(payload: Payload) -> Result<Self> {
        check_payload(&payload)?;
        Ok(Value::from_payload(payload))
    }
}

impl Value {
    /// Create a null value
    pub const fn null() -> Self {
        Self { payload: None }
    }

    /// Wrap a payload already known to be well-formed
    pub(crate) fn from_payload(payload: Payload) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// The current tag, or `None` when null
    pub fn value_type(&self) -> Option<ValueType> {
        self.payload.as_ref().map(Payload::value_type)
    }

    /// Borrow the active payload for exhaustive matching
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Take the payload out, leaving this value null
    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }

    // -------------------------------------------------------------------------
    // Nullness
    // -------------------------------------------------------------------------

    pub fn is_null(&self) -> bool {
        self.payload.is_none()
    }

    /// Clear the tag and release the payload
    pub fn set_null(&mut self) {
        self.payload = None;
    }

    // -------------------------------------------------------------------------
    // Assignment
    // -------------------------------------------------------------------------

    /// Replace this value with a copy of `other`
    pub fn assign(&mut self, other: &Value) {
        self.payload.clone_from(&other.payload);
    }

    /// Replace this value with `other`'s payload, leaving `other` null
    pub fn assign_move(&mut self, other: &mut Value) {
        self.payload = other.payload.take();
    }

    // -------------------------------------------------------------------------
    // Record Persistence
    // -------------------------------------------------------------------------

    /// Encode the record itself (tag, payload and nesting) for storage
    ///
    /// This is the storage-side representation, not the client wire format.
    pub fn encode_record(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a record written by [`Value::encode_record`]
    ///
    /// Every nested value is re-validated on the way in, so a damaged record
    /// fails with `Serialization` rather than yielding a malformed address,
    /// decimal or timeuuid.
    pub fn decode_record(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Name of the current tag for messages
    pub(crate) fn type_name(&self) -> &'static str {
        self.value_type().map_or("null", ValueType::name)
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::from_payload(Payload::$variant(value))
                }
            }
        )*
    };
}

impl_from_scalar! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    bool => Bool,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_payload(Payload::String(value.to_string()))
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::from_payload(Payload::Timestamp(value.as_millis()))
    }
}

impl From<IpAddr> for Value {
    fn from(value: IpAddr) -> Self {
        Value::from_payload(Payload::Inet(ip_to_bytes(&value)))
    }
}

/// Converts to a plain (not time-based) uuid value
impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::from_payload(Payload::Uuid(*value.as_bytes()))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Value::null, Into::into)
    }
}

// =============================================================================
// Byte-form Helpers
// =============================================================================

pub(crate) fn ip_to_bytes(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

pub(crate) fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        IPV4_SIZE => {
            let mut octets = [0u8; IPV4_SIZE];
            octets.copy_from_slice(bytes);
            Some(IpAddr::from(octets))
        }
        IPV6_SIZE => {
            let mut octets = [0u8; IPV6_SIZE];
            octets.copy_from_slice(bytes);
            Some(IpAddr::from(octets))
        }
        _ => None,
    }
}

/// Reject byte forms the accessors cannot decode
///
/// Nested values are not revisited: a `Value` inside a collection was
/// already checked when it was built.
fn check_payload(payload: &Payload) -> Result<()> {
    match payload {
        Payload::Inet(bytes) if ip_from_bytes(bytes).is_none() => Err(QlError::invalid_argument(
            format!("inet: {} bytes is not an address length", bytes.len()),
        )),
        Payload::TimeUuid(bytes) if !is_time_uuid(&Uuid::from_bytes(*bytes)) => Err(
            QlError::invalid_argument("timeuuid: version is not time-based"),
        ),
        Payload::Decimal(bytes) if decimal::decode(bytes).is_err() => Err(
            QlError::invalid_argument(format!("decimal: {} bytes is not a decimal", bytes.len())),
        ),
        Payload::Map(map) if map.keys.len() != map.values.len() => {
            Err(QlError::invalid_argument(format!(
                "map: {} keys but {} values",
                map.keys.len(),
                map.values.len()
            )))
        }
        _ => Ok(()),
    }
}

/// Version 1 is the only time-based UUID version
pub(crate) fn is_time_uuid(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 1
}
