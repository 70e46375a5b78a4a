//! Host value conversion
//!
//! Turns plain Rust values into [`Value`]s for a declared column type.

use std::collections::BTreeMap;
use std::net::IpAddr;

use bigdecimal::{BigDecimal, FromPrimitive};
use uuid::Uuid;

use crate::error::{QlError, Result};
use crate::types::{DataType, Timestamp};
use crate::value::Value;

/// A host value that can fill a cell of a given column type
pub trait ColumnValue {
    fn to_value(self, data_type: &DataType) -> Result<Value>;
}

fn mismatch(what: &str, data_type: &DataType) -> QlError {
    QlError::invalid_argument(format!("cannot store {} in a {} column", what, data_type))
}

// =============================================================================
// Values
// =============================================================================

/// Accepted as-is when null or already tagged for the column
impl ColumnValue for Value {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match self.value_type() {
            None => Ok(self),
            Some(tag) if tag == data_type.value_type() => Ok(self),
            Some(tag) => Err(mismatch(tag.name(), data_type)),
        }
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(data_type),
            None => Ok(Value::null()),
        }
    }
}

// =============================================================================
// Numbers
// =============================================================================

macro_rules! impl_column_value_int {
    ($($ty:ty),*) => {
        $(
            impl ColumnValue for $ty {
                fn to_value(self, data_type: &DataType) -> Result<Value> {
                    int_to_value(i64::from(self), data_type)
                }
            }
        )*
    };
}

impl_column_value_int!(i8, i16, i32, i64, u8, u16, u32);

fn int_to_value(n: i64, data_type: &DataType) -> Result<Value> {
    let mut value = Value::null();
    match data_type {
        DataType::TinyInt => value.set_int8_value(narrow(n, data_type)?),
        DataType::SmallInt => value.set_int16_value(narrow(n, data_type)?),
        DataType::Int => value.set_int32_value(narrow(n, data_type)?),
        DataType::BigInt => value.set_int64_value(n),
        DataType::Float => value.set_float_value(n as f32),
        DataType::Double => value.set_double_value(n as f64),
        DataType::Decimal => value.set_decimal_value(&BigDecimal::from(n))?,
        DataType::Timestamp => value.set_timestamp_value(n),
        _ => return Err(mismatch("an integer", data_type)),
    }
    Ok(value)
}

fn narrow<T: TryFrom<i64>>(n: i64, data_type: &DataType) -> Result<T> {
    T::try_from(n)
        .map_err(|_| QlError::invalid_argument(format!("{} is out of range for {}", n, data_type)))
}

impl ColumnValue for f64 {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let mut value = Value::null();
        match data_type {
            DataType::Float => value.set_float_value(self as f32),
            DataType::Double => value.set_double_value(self),
            DataType::Decimal => {
                let decimal = BigDecimal::from_f64(self).ok_or_else(|| {
                    QlError::invalid_argument(format!("{} has no decimal form", self))
                })?;
                value.set_decimal_value(&decimal)?;
            }
            _ => return Err(mismatch("a float", data_type)),
        }
        Ok(value)
    }
}

impl ColumnValue for f32 {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        f64::from(self).to_value(data_type)
    }
}

impl ColumnValue for BigDecimal {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match data_type {
            DataType::Decimal => {
                let mut value = Value::null();
                value.set_decimal_value(&self)?;
                Ok(value)
            }
            _ => Err(mismatch("a decimal", data_type)),
        }
    }
}

// =============================================================================
// Other Scalars
// =============================================================================

impl ColumnValue for bool {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match data_type {
            DataType::Boolean => Ok(Value::from(self)),
            _ => Err(mismatch("a boolean", data_type)),
        }
    }
}

impl ColumnValue for &str {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let mut value = Value::null();
        match data_type {
            DataType::Text => value.set_string_value(self),
            DataType::Blob => value.set_binary_value(self.as_bytes()),
            DataType::Inet => {
                let addr: IpAddr = self
                    .parse()
                    .map_err(|e| QlError::invalid_argument(format!("inet {:?}: {}", self, e)))?;
                value.set_inetaddress_value(addr);
            }
            DataType::Uuid | DataType::TimeUuid => {
                let uuid = Uuid::parse_str(self)
                    .map_err(|e| QlError::invalid_argument(format!("uuid {:?}: {}", self, e)))?;
                return uuid.to_value(data_type);
            }
            DataType::Decimal => {
                let decimal: BigDecimal = self
                    .parse()
                    .map_err(|e| QlError::invalid_argument(format!("decimal {:?}: {}", self, e)))?;
                value.set_decimal_value(&decimal)?;
            }
            _ => return Err(mismatch("a string", data_type)),
        }
        Ok(value)
    }
}

impl ColumnValue for String {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match data_type {
            DataType::Text => Ok(Value::from(self)),
            _ => self.as_str().to_value(data_type),
        }
    }
}

impl ColumnValue for &[u8] {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let mut value = Value::null();
        match data_type {
            DataType::Blob => value.set_binary_value(self),
            DataType::Inet => value.set_inetaddress_bytes(self)?,
            _ => return Err(mismatch("bytes", data_type)),
        }
        Ok(value)
    }
}

impl ColumnValue for IpAddr {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match data_type {
            DataType::Inet => Ok(Value::from(self)),
            _ => Err(mismatch("an address", data_type)),
        }
    }
}

impl ColumnValue for Uuid {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let mut value = Value::null();
        match data_type {
            DataType::Uuid => value.set_uuid_value(self),
            DataType::TimeUuid => value.set_timeuuid_value(self)?,
            _ => return Err(mismatch("a uuid", data_type)),
        }
        Ok(value)
    }
}

impl ColumnValue for Timestamp {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        match data_type {
            DataType::Timestamp => Ok(Value::from(self)),
            _ => Err(mismatch("a timestamp", data_type)),
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

/// Fills a list or set column, converting each element
impl<T: ColumnValue> ColumnValue for Vec<T> {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let mut value = Value::null();
        match data_type {
            DataType::List(elem_type) => {
                value.set_list_value();
                for elem in self {
                    *value.add_list_elem() = elem.to_value(elem_type)?;
                }
            }
            DataType::Set(elem_type) => {
                value.set_set_value();
                for elem in self {
                    *value.add_set_elem() = elem.to_value(elem_type)?;
                }
            }
            _ => return Err(mismatch("a sequence", data_type)),
        }
        Ok(value)
    }
}

impl<K: ColumnValue, V: ColumnValue> ColumnValue for BTreeMap<K, V> {
    fn to_value(self, data_type: &DataType) -> Result<Value> {
        let (key_type, value_type) = match data_type {
            DataType::Map(key_type, value_type) => (key_type, value_type),
            _ => return Err(mismatch("a map", data_type)),
        };

        let mut value = Value::null();
        value.set_map_value();
        for (k, v) in self {
            *value.add_map_key() = k.to_value(key_type)?;
            *value.add_map_value() = v.to_value(value_type)?;
        }
        Ok(value)
    }
}
