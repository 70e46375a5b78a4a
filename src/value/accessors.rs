//! Typed accessors
//!
//! Getters assert that the value holds the requested tag. A mismatch means a
//! type-inference bug upstream, so it panics rather than returning an error.
//! Setters always replace whatever tag was there before.

use std::net::IpAddr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::{ip_from_bytes, ip_to_bytes, is_time_uuid, Payload, Value};
use crate::error::{QlError, Result};
use crate::types::{decimal, Timestamp, ValueType};

/// Get a mutable reference to the payload of `$variant`, switching the tag
/// to an empty `$variant` first if it holds anything else
macro_rules! payload_mut {
    ($value:expr, $variant:ident, $empty:expr) => {{
        if !matches!($value.payload, Some(Payload::$variant(_))) {
            $value.payload = Some(Payload::$variant($empty));
        }
        match &mut $value.payload {
            Some(Payload::$variant(inner)) => inner,
            _ => unreachable!("payload was just set"),
        }
    }};
}

pub(super) use payload_mut;

macro_rules! copy_accessors {
    ($($getter:ident, $setter:ident, $ty:ty, $variant:ident;)*) => {
        $(
            #[track_caller]
            pub fn $getter(&self) -> $ty {
                match &self.payload {
                    Some(Payload::$variant(v)) => *v,
                    _ => self.tag_mismatch(ValueType::$variant),
                }
            }

            pub fn $setter(&mut self, value: $ty) {
                self.payload = Some(Payload::$variant(value));
            }
        )*
    };
}

impl Value {
    // =========================================================================
    // Fixed-width Scalars
    // =========================================================================

    copy_accessors! {
        int8_value, set_int8_value, i8, Int8;
        int16_value, set_int16_value, i16, Int16;
        int32_value, set_int32_value, i32, Int32;
        int64_value, set_int64_value, i64, Int64;
        float_value, set_float_value, f32, Float;
        double_value, set_double_value, f64, Double;
        bool_value, set_bool_value, bool, Bool;
    }

    #[track_caller]
    pub fn timestamp_value(&self) -> Timestamp {
        match &self.payload {
            Some(Payload::Timestamp(millis)) => Timestamp::from_millis(*millis),
            _ => self.tag_mismatch(ValueType::Timestamp),
        }
    }

    /// Accepts a [`Timestamp`] or raw milliseconds
    pub fn set_timestamp_value(&mut self, value: impl Into<Timestamp>) {
        self.payload = Some(Payload::Timestamp(value.into().as_millis()));
    }

    // =========================================================================
    // Strings
    // =========================================================================

    #[track_caller]
    pub fn string_value(&self) -> &str {
        match &self.payload {
            Some(Payload::String(s)) => s,
            _ => self.tag_mismatch(ValueType::String),
        }
    }

    pub fn set_string_value(&mut self, value: impl Into<String>) {
        self.payload = Some(Payload::String(value.into()));
    }

    /// Build a string in place; sets the string tag if not already set
    pub fn mutable_string_value(&mut self) -> &mut String {
        payload_mut!(self, String, String::new())
    }

    #[track_caller]
    pub fn binary_value(&self) -> &[u8] {
        match &self.payload {
            Some(Payload::Binary(b)) => b,
            _ => self.tag_mismatch(ValueType::Binary),
        }
    }

    pub fn set_binary_value(&mut self, value: impl Into<Vec<u8>>) {
        self.payload = Some(Payload::Binary(value.into()));
    }

    /// Build a binary string in place; sets the binary tag if not already set
    pub fn mutable_binary_value(&mut self) -> &mut Vec<u8> {
        payload_mut!(self, Binary, Vec::new())
    }

    // =========================================================================
    // Decimal
    // =========================================================================

    /// Decoded decimal
    ///
    /// Panics if the stored bytes are malformed, which only happens when a
    /// caller wrote garbage through [`Value::mutable_decimal_value`].
    #[track_caller]
    pub fn decimal_value(&self) -> BigDecimal {
        match decimal::decode(self.decimal_bytes()) {
            Ok(value) => value,
            Err(e) => panic!("stored decimal is malformed: {}", e),
        }
    }

    /// Canonical decimal bytes as stored
    #[track_caller]
    pub fn decimal_bytes(&self) -> &[u8] {
        match &self.payload {
            Some(Payload::Decimal(bytes)) => bytes,
            _ => self.tag_mismatch(ValueType::Decimal),
        }
    }

    /// Set a decimal of any precision
    ///
    /// Fails with `InvalidArgument` if the scale does not fit in 32 bits; the
    /// value is left untouched in that case.
    pub fn set_decimal_value(&mut self, value: &BigDecimal) -> Result<()> {
        self.payload = Some(Payload::Decimal(decimal::encode(value)?));
        Ok(())
    }

    /// Store canonical decimal bytes as-is
    ///
    /// Fails with `InvalidArgument` if the bytes do not decode.
    pub fn set_decimal_bytes(&mut self, bytes: impl Into<Vec<u8>>) -> Result<()> {
        let bytes = bytes.into();
        if decimal::decode(&bytes).is_err() {
            return Err(QlError::invalid_argument(format!(
                "decimal: {} bytes is not a decimal",
                bytes.len()
            )));
        }
        self.payload = Some(Payload::Decimal(bytes));
        Ok(())
    }

    /// Build decimal bytes in place; sets the decimal tag if not already set
    pub fn mutable_decimal_value(&mut self) -> &mut Vec<u8> {
        payload_mut!(self, Decimal, Vec::new())
    }

    // =========================================================================
    // Inet
    // =========================================================================

    #[track_caller]
    pub fn inetaddress_value(&self) -> IpAddr {
        match ip_from_bytes(self.inetaddress_bytes()) {
            Some(addr) => addr,
            None => unreachable!("inet payload always holds 4 or 16 bytes"),
        }
    }

    /// Canonical address bytes (4 for IPv4, 16 for IPv6)
    #[track_caller]
    pub fn inetaddress_bytes(&self) -> &[u8] {
        match &self.payload {
            Some(Payload::Inet(bytes)) => bytes,
            _ => self.tag_mismatch(ValueType::Inet),
        }
    }

    pub fn set_inetaddress_value(&mut self, addr: IpAddr) {
        self.payload = Some(Payload::Inet(ip_to_bytes(&addr)));
    }

    /// Set an address from raw bytes
    ///
    /// Fails with `InvalidArgument` unless given exactly 4 or 16 bytes.
    pub fn set_inetaddress_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let addr = ip_from_bytes(bytes).ok_or_else(|| {
            QlError::invalid_argument(format!(
                "inet address must be 4 or 16 bytes, got {}",
                bytes.len()
            ))
        })?;
        self.set_inetaddress_value(addr);
        Ok(())
    }

    // =========================================================================
    // UUID
    // =========================================================================

    #[track_caller]
    pub fn uuid_value(&self) -> Uuid {
        match &self.payload {
            Some(Payload::Uuid(bytes)) => Uuid::from_bytes(*bytes),
            _ => self.tag_mismatch(ValueType::Uuid),
        }
    }

    pub fn set_uuid_value(&mut self, uuid: Uuid) {
        self.payload = Some(Payload::Uuid(*uuid.as_bytes()));
    }

    #[track_caller]
    pub fn timeuuid_value(&self) -> Uuid {
        match &self.payload {
            Some(Payload::TimeUuid(bytes)) => {
                let uuid = Uuid::from_bytes(*bytes);
                assert!(is_time_uuid(&uuid), "timeuuid payload {} is not time-based", uuid);
                uuid
            }
            _ => self.tag_mismatch(ValueType::TimeUuid),
        }
    }

    /// Set a time-based UUID
    ///
    /// Fails with `InvalidArgument` if the version field is not 1; the value
    /// is left untouched in that case.
    pub fn set_timeuuid_value(&mut self, uuid: Uuid) -> Result<()> {
        if !is_time_uuid(&uuid) {
            return Err(QlError::invalid_argument(format!(
                "{} is not a time-based uuid (version {})",
                uuid,
                uuid.get_version_num()
            )));
        }
        self.payload = Some(Payload::TimeUuid(*uuid.as_bytes()));
        Ok(())
    }

    // =========================================================================
    // Assertion
    // =========================================================================

    #[track_caller]
    pub(crate) fn tag_mismatch(&self, expected: ValueType) -> ! {
        panic!(
            "value type mismatch: expected {}, found {}",
            expected,
            self.type_name()
        )
    }
}
