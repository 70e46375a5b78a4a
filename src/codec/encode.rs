//! Value encoding
//!
//! Appends the wire form of a value to a buffer. Tag mismatches between the
//! value and the declared type panic through the typed getters.

use bytes::BufMut;
use bytes::BytesMut;
use tracing::trace;

use super::{LENGTH_SIZE, NULL_LENGTH};
use crate::error::{QlError, Result};
use crate::types::{decimal, DataType};
use crate::value::Value;

/// Encode `value` as `data_type`
pub(crate) fn encode_value(value: &Value, data_type: &DataType, buf: &mut BytesMut) -> Result<()> {
    if data_type.is_fixed_width() {
        assert!(
            !value.is_null(),
            "null {} has no fixed-width wire encoding",
            data_type
        );
    } else if value.is_null() {
        buf.put_i32(NULL_LENGTH);
        return Ok(());
    }

    match data_type {
        // ---------------------------------------------------------------------
        // Fixed-width: bare big-endian payload
        // ---------------------------------------------------------------------
        DataType::TinyInt => buf.put_i8(value.int8_value()),
        DataType::SmallInt => buf.put_i16(value.int16_value()),
        DataType::Int => buf.put_i32(value.int32_value()),
        DataType::BigInt => buf.put_i64(value.int64_value()),
        DataType::Float => buf.put_f32(value.float_value()),
        DataType::Double => buf.put_f64(value.double_value()),
        DataType::Boolean => buf.put_u8(u8::from(value.bool_value())),
        DataType::Timestamp => buf.put_i64(value.timestamp_value().as_millis()),
        DataType::Uuid => buf.put_slice(value.uuid_value().as_bytes()),
        DataType::TimeUuid => buf.put_slice(value.timeuuid_value().as_bytes()),

        // ---------------------------------------------------------------------
        // Variable-length: length prefix + bytes
        // ---------------------------------------------------------------------
        DataType::Decimal => put_decimal(buf, value.decimal_bytes())?,
        DataType::Text => put_bytes(buf, value.string_value().as_bytes())?,
        DataType::Blob => put_bytes(buf, value.binary_value())?,
        DataType::Inet => put_bytes(buf, value.inetaddress_bytes())?,

        // ---------------------------------------------------------------------
        // Collections: count + framed elements
        // ---------------------------------------------------------------------
        DataType::Map(key_type, value_type) => {
            let map = value.map_value();
            assert_eq!(
                map.keys.len(),
                map.values.len(),
                "map has {} keys but {} values",
                map.keys.len(),
                map.values.len()
            );
            trace!(pairs = map.keys.len(), %data_type, "encoding map");

            buf.put_i32(wire_len(map.keys.len())?);
            for (key, val) in map.iter() {
                encode_elem(key, key_type, buf)?;
                encode_elem(val, value_type, buf)?;
            }
        }
        DataType::Set(elem_type) => encode_seq(value.set_value(), elem_type, data_type, buf)?,
        DataType::List(elem_type) => encode_seq(value.list_value(), elem_type, data_type, buf)?,
    }

    Ok(())
}

fn encode_seq(
    elems: &[Value],
    elem_type: &DataType,
    data_type: &DataType,
    buf: &mut BytesMut,
) -> Result<()> {
    trace!(elems = elems.len(), %data_type, "encoding collection");

    buf.put_i32(wire_len(elems.len())?);
    for elem in elems {
        encode_elem(elem, elem_type, buf)?;
    }
    Ok(())
}

/// Encode one collection element inside its own length frame
///
/// A null element is a bare negative frame length, whatever its type.
fn encode_elem(elem: &Value, elem_type: &DataType, buf: &mut BytesMut) -> Result<()> {
    if elem.is_null() {
        buf.put_i32(NULL_LENGTH);
        return Ok(());
    }

    // Reserve the frame length and backfill it once the element is written
    let start = buf.len();
    buf.put_i32(0);
    encode_value(elem, elem_type, buf)?;
    let len = wire_len(buf.len() - start - LENGTH_SIZE)?;
    buf[start..start + LENGTH_SIZE].copy_from_slice(&len.to_be_bytes());
    Ok(())
}

/// Decimal bytes built by hand through the mutable buffer are checked here
fn put_decimal(buf: &mut BytesMut, bytes: &[u8]) -> Result<()> {
    if decimal::decode(bytes).is_err() {
        return Err(QlError::invalid_argument(format!(
            "decimal: {} stored bytes is not a decimal",
            bytes.len()
        )));
    }
    put_bytes(buf, bytes)
}

fn put_bytes(buf: &mut BytesMut, bytes: &[u8]) -> Result<()> {
    buf.put_i32(wire_len(bytes.len())?);
    buf.put_slice(bytes);
    Ok(())
}

fn wire_len(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        QlError::invalid_argument(format!("{} exceeds the largest wire length", len))
    })
}
