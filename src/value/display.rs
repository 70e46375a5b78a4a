//! Debug strings
//!
//! Human-readable only: enough to tell the tag and value apart in logs.
//! Not wire-compatible and never parsed back.

use std::fmt;

use uuid::Uuid;

use super::{ip_from_bytes, Payload, Value};
use crate::types::decimal;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = match &self.payload {
            Some(payload) => payload,
            None => return f.write_str("null"),
        };

        write!(f, "{}:", payload.value_type())?;
        match payload {
            Payload::Int8(v) => write!(f, "{}", v),
            Payload::Int16(v) => write!(f, "{}", v),
            Payload::Int32(v) => write!(f, "{}", v),
            Payload::Int64(v) => write!(f, "{}", v),
            Payload::Float(v) => write!(f, "{}", v),
            Payload::Double(v) => write!(f, "{}", v),
            Payload::Bool(v) => write!(f, "{}", v),
            Payload::Timestamp(millis) => write!(f, "{}", millis),
            Payload::String(s) => write!(f, "{:?}", s),
            Payload::Binary(bytes) => write_hex(f, bytes),
            Payload::Decimal(bytes) => match decimal::decode(bytes) {
                Ok(value) => write!(f, "{}", value),
                Err(_) => write_hex(f, bytes),
            },
            Payload::Inet(bytes) => match ip_from_bytes(bytes) {
                Some(addr) => write!(f, "{}", addr),
                None => write_hex(f, bytes),
            },
            Payload::Uuid(bytes) | Payload::TimeUuid(bytes) => {
                write!(f, "{}", Uuid::from_bytes(*bytes))
            }
            Payload::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} -> {}", key, value)?;
                }
                f.write_str("}")
            }
            Payload::Set(elems) => write_seq(f, "{", elems, "}"),
            Payload::List(elems) => write_seq(f, "[", elems, "]"),
        }
    }
}

impl Value {
    /// Debug string for logging
    pub fn to_debug_string(&self) -> String {
        self.to_string()
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, elems: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", elem)?;
    }
    f.write_str(close)
}
