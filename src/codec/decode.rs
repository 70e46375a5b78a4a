//! Value decoding
//!
//! Consumes bytes from a cursor (`&mut &[u8]`) and builds a fresh value.
//! Truncated or malformed input fails with `Corruption`; nothing here ever
//! waits for more bytes.

use tracing::trace;
use uuid::Uuid;

use super::LENGTH_SIZE;
use crate::config::Config;
use crate::error::{QlError, Result};
use crate::types::{decimal, DataType, Timestamp};
use crate::value::{ip_from_bytes, is_time_uuid, Value};

/// Limits applied while decoding untrusted input
#[derive(Debug, Clone, Copy)]
pub(crate) struct Limits {
    pub max_value_size: usize,
    pub max_collection_len: usize,
}

impl From<&Config> for Limits {
    fn from(config: &Config) -> Self {
        Self {
            max_value_size: config.max_value_size,
            max_collection_len: config.max_collection_len,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

// =============================================================================
// Numeric Helper
// =============================================================================

/// Read exactly `N` bytes and convert them with `convert`
///
/// `convert` does the byte-order conversion, e.g. `i32::from_be_bytes`.
pub(crate) fn decode_num<T, const N: usize>(
    data: &mut &[u8],
    convert: impl FnOnce([u8; N]) -> T,
) -> Result<T> {
    if data.len() < N {
        return Err(QlError::corruption(format!(
            "expected {} bytes, only {} remaining",
            N,
            data.len()
        )));
    }

    let (head, rest) = data.split_at(N);
    let mut raw = [0u8; N];
    raw.copy_from_slice(head);
    *data = rest;
    Ok(convert(raw))
}

// =============================================================================
// Values
// =============================================================================

/// Decode one value of `data_type`
pub(crate) fn decode_value(data_type: &DataType, limits: &Limits, data: &mut &[u8]) -> Result<Value> {
    let mut value = Value::null();

    match data_type {
        // ---------------------------------------------------------------------
        // Fixed-width
        // ---------------------------------------------------------------------
        DataType::TinyInt => value.set_int8_value(decode_num(data, i8::from_be_bytes)?),
        DataType::SmallInt => value.set_int16_value(decode_num(data, i16::from_be_bytes)?),
        DataType::Int => value.set_int32_value(decode_num(data, i32::from_be_bytes)?),
        DataType::BigInt => value.set_int64_value(decode_num(data, i64::from_be_bytes)?),
        DataType::Float => value.set_float_value(decode_num(data, f32::from_be_bytes)?),
        DataType::Double => value.set_double_value(decode_num(data, f64::from_be_bytes)?),
        DataType::Boolean => value.set_bool_value(decode_num(data, u8::from_be_bytes)? != 0),
        DataType::Timestamp => {
            let millis = decode_num(data, i64::from_be_bytes)?;
            value.set_timestamp_value(Timestamp::from_millis(millis));
        }
        DataType::Uuid => value.set_uuid_value(decode_num(data, Uuid::from_bytes)?),
        DataType::TimeUuid => {
            let uuid = decode_num(data, Uuid::from_bytes)?;
            if !is_time_uuid(&uuid) {
                return Err(QlError::corruption(format!(
                    "timeuuid: {} has version {}, not time-based",
                    uuid,
                    uuid.get_version_num()
                )));
            }
            value.set_timeuuid_value(uuid)?;
        }

        // ---------------------------------------------------------------------
        // Variable-length
        // ---------------------------------------------------------------------
        DataType::Decimal => {
            if let Some(bytes) = read_bytes(data, limits, data_type)? {
                decimal::decode(bytes)?;
                *value.mutable_decimal_value() = bytes.to_vec();
            }
        }
        DataType::Text => {
            if let Some(bytes) = read_bytes(data, limits, data_type)? {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| QlError::corruption(format!("text: {}", e)))?;
                value.set_string_value(text);
            }
        }
        DataType::Blob => {
            if let Some(bytes) = read_bytes(data, limits, data_type)? {
                value.set_binary_value(bytes);
            }
        }
        DataType::Inet => {
            if let Some(bytes) = read_bytes(data, limits, data_type)? {
                let addr = ip_from_bytes(bytes).ok_or_else(|| {
                    QlError::corruption(format!(
                        "inet: {} bytes is not an address length",
                        bytes.len()
                    ))
                })?;
                value.set_inetaddress_value(addr);
            }
        }

        // ---------------------------------------------------------------------
        // Collections
        // ---------------------------------------------------------------------
        DataType::Map(key_type, value_type) => {
            if let Some(count) = read_count(data, limits, 2 * LENGTH_SIZE, data_type)? {
                trace!(pairs = count, %data_type, "decoding map");
                value.set_map_value();
                for _ in 0..count {
                    let key = decode_elem(key_type, limits, data)?;
                    let val = decode_elem(value_type, limits, data)?;
                    *value.add_map_key() = key;
                    *value.add_map_value() = val;
                }
            }
        }
        DataType::Set(elem_type) => {
            if let Some(count) = read_count(data, limits, LENGTH_SIZE, data_type)? {
                trace!(elems = count, %data_type, "decoding set");
                value.set_set_value();
                for _ in 0..count {
                    *value.add_set_elem() = decode_elem(elem_type, limits, data)?;
                }
            }
        }
        DataType::List(elem_type) => {
            if let Some(count) = read_count(data, limits, LENGTH_SIZE, data_type)? {
                trace!(elems = count, %data_type, "decoding list");
                value.set_list_value();
                for _ in 0..count {
                    *value.add_list_elem() = decode_elem(elem_type, limits, data)?;
                }
            }
        }
    }

    Ok(value)
}

/// Decode one collection element from its length frame
///
/// The element must consume its frame exactly.
fn decode_elem(elem_type: &DataType, limits: &Limits, data: &mut &[u8]) -> Result<Value> {
    let len = match read_length(data)? {
        Some(len) => len,
        None => return Ok(Value::null()),
    };
    if len > data.len() {
        return Err(QlError::corruption(format!(
            "{} element: frame of {} bytes exceeds remaining {} bytes",
            elem_type,
            len,
            data.len()
        )));
    }

    let (mut frame, rest) = data.split_at(len);
    let elem = decode_value(elem_type, limits, &mut frame)?;
    if !frame.is_empty() {
        return Err(QlError::corruption(format!(
            "{} element: {} trailing bytes in frame",
            elem_type,
            frame.len()
        )));
    }

    *data = rest;
    Ok(elem)
}

// =============================================================================
// Length Prefixes
// =============================================================================

/// Read a length prefix; negative means null
fn read_length(data: &mut &[u8]) -> Result<Option<usize>> {
    let len = decode_num(data, i32::from_be_bytes)?;
    Ok(usize::try_from(len).ok())
}

/// Read a length-prefixed payload, or `None` for null
fn read_bytes<'a>(
    data: &mut &'a [u8],
    limits: &Limits,
    data_type: &DataType,
) -> Result<Option<&'a [u8]>> {
    let len = match read_length(data)? {
        Some(len) => len,
        None => return Ok(None),
    };
    if len > limits.max_value_size {
        return Err(QlError::corruption(format!(
            "{}: length {} exceeds limit {}",
            data_type, len, limits.max_value_size
        )));
    }
    if len > data.len() {
        return Err(QlError::corruption(format!(
            "{}: declared length {} exceeds remaining {} bytes",
            data_type,
            len,
            data.len()
        )));
    }

    let (bytes, rest) = data.split_at(len);
    *data = rest;
    Ok(Some(bytes))
}

/// Read a collection count, or `None` for null
///
/// Every element needs at least `min_elem_size` bytes of framing, so counts
/// the remaining input cannot possibly hold are rejected up front.
fn read_count(
    data: &mut &[u8],
    limits: &Limits,
    min_elem_size: usize,
    data_type: &DataType,
) -> Result<Option<usize>> {
    let count = match read_length(data)? {
        Some(count) => count,
        None => return Ok(None),
    };
    if count > limits.max_collection_len {
        return Err(QlError::corruption(format!(
            "{}: {} elements exceeds limit {}",
            data_type, count, limits.max_collection_len
        )));
    }
    if count.saturating_mul(min_elem_size) > data.len() {
        return Err(QlError::corruption(format!(
            "{}: {} elements cannot fit in remaining {} bytes",
            data_type,
            count,
            data.len()
        )));
    }
    Ok(Some(count))
}
