//! Codec Module
//!
//! Client wire encoding for values.
//!
//! ## Wire Format
//! All numerics are big-endian (network order).
//!
//! ### Fixed-width types (no prefix, never null)
//! ```text
//! tinyint (1)  smallint (2)  int (4)  bigint (8)  float (4)  double (8)
//! boolean (1, 0 or 1)        timestamp (8, millis)  uuid/timeuuid (16)
//! ```
//!
//! ### Variable-length types (text, blob, decimal, inet)
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (4)  │         Payload             │
//! └──────────┴─────────────────────────────┘
//! Len < 0: null, no payload follows
//! ```
//!
//! ### Collections (map, set, list)
//! ```text
//! ┌──────────┬──────────────┬──────────────┬─────┐
//! │Count (4) │ Elem frame 1 │ Elem frame 2 │ ... │
//! └──────────┴──────────────┴──────────────┴─────┘
//! Elem frame: Len (4) + element encoding of exactly Len bytes
//!             (Len < 0: null element)
//! Map: key frame, value frame, key frame, value frame, ...
//! ```
//!
//! Element types never appear on the wire; the caller's declared
//! [`DataType`] supplies them at every level of nesting.

mod client;
mod decode;
mod encode;

pub use client::ClientProtocol;

use bytes::BytesMut;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::types::DataType;
use crate::value::Value;
use decode::Limits;

/// Length prefix size
pub const LENGTH_SIZE: usize = 4;

/// Length prefix written for null
pub const NULL_LENGTH: i32 = -1;

// =============================================================================
// Value Entry Points
// =============================================================================

impl Value {
    /// Append the wire form of this value, encoded as `data_type`
    ///
    /// Fails with `InvalidArgument` if `data_type` is not legal under
    /// `client`. Panics if the value's tag does not match `data_type`, or if
    /// it is null and `data_type` is fixed-width.
    pub fn serialize(
        &self,
        data_type: &DataType,
        client: ClientProtocol,
        buf: &mut BytesMut,
    ) -> Result<()> {
        client.check(data_type)?;
        encode::encode_value(self, data_type, buf)
    }

    /// Replace this value with one decoded from the front of `data`
    ///
    /// On success `data` is advanced past the consumed bytes. On failure
    /// neither `self` nor `data` is changed.
    pub fn deserialize(
        &mut self,
        data_type: &DataType,
        client: ClientProtocol,
        data: &mut &[u8],
    ) -> Result<()> {
        deserialize_with(self, data_type, client, &Limits::default(), data)
    }
}

fn deserialize_with(
    target: &mut Value,
    data_type: &DataType,
    client: ClientProtocol,
    limits: &Limits,
    data: &mut &[u8],
) -> Result<()> {
    client.check(data_type)?;

    let mut cursor = *data;
    let value = decode::decode_value(data_type, limits, &mut cursor).map_err(|e| {
        debug!(%data_type, error = %e, "value decode failed");
        e
    })?;

    *target = value;
    *data = cursor;
    Ok(())
}

// =============================================================================
// Configured Codec
// =============================================================================

/// Codec bound to a [`Config`]: default protocol and decode limits
#[derive(Debug, Clone)]
pub struct WireCodec {
    config: Config,
    limits: Limits,
}

impl WireCodec {
    pub fn new(config: Config) -> Self {
        let limits = Limits::from(&config);
        Self { config, limits }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode a value into a fresh buffer
    pub fn encode(&self, value: &Value, data_type: &DataType) -> Result<BytesMut> {
        let mut buf = BytesMut::new();
        self.encode_into(value, data_type, &mut buf)?;
        Ok(buf)
    }

    /// Append a value to an existing buffer
    pub fn encode_into(&self, value: &Value, data_type: &DataType, buf: &mut BytesMut) -> Result<()> {
        value.serialize(data_type, self.config.protocol, buf)
    }

    /// Decode one value from the front of `data`, advancing it on success
    pub fn decode(&self, data_type: &DataType, data: &mut &[u8]) -> Result<Value> {
        let mut value = Value::null();
        deserialize_with(&mut value, data_type, self.config.protocol, &self.limits, data)?;
        Ok(value)
    }
}

impl Default for WireCodec {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
