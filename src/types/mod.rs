//! Types Module
//!
//! Logical column types and value tags.
//!
//! ## Two Kinds of Type
//! - [`DataType`]: the logical type a column or expression is declared with.
//!   Collections carry their element (or key/value) types here, out-of-band
//!   from the values themselves.
//! - [`ValueType`]: the tag of the one payload a [`Value`](crate::Value)
//!   currently holds. Several logical types can share a tag shape on the wire
//!   but never share a tag.
//!
//! ## CQL Type Names
//! ```text
//! tinyint  -> Int8        text/varchar -> String
//! smallint -> Int16       blob         -> Binary
//! int      -> Int32       timestamp    -> Timestamp
//! bigint   -> Int64       inet         -> Inet
//! float    -> Float       uuid         -> Uuid
//! double   -> Double      timeuuid     -> TimeUuid
//! decimal  -> Decimal     map<k, v>    -> Map
//! boolean  -> Bool        set<e>, list<e> -> Set, List
//! ```

pub mod decimal;
mod timestamp;

pub use timestamp::Timestamp;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QlError, Result};

// =============================================================================
// Value Tags
// =============================================================================

/// Tag identifying which payload a value holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    Bool,
    String,
    Timestamp,
    Binary,
    Inet,
    Map,
    Set,
    List,
    Uuid,
    TimeUuid,
}

impl ValueType {
    /// Short name used in debug strings
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Int8 => "int8",
            ValueType::Int16 => "int16",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Decimal => "decimal",
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Timestamp => "timestamp",
            ValueType::Binary => "binary",
            ValueType::Inet => "inet",
            ValueType::Map => "map",
            ValueType::Set => "set",
            ValueType::List => "list",
            ValueType::Uuid => "uuid",
            ValueType::TimeUuid => "timeuuid",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Logical Types
// =============================================================================

/// Logical type of a column or expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Boolean,
    Text,
    Blob,
    Timestamp,
    Inet,
    Uuid,
    TimeUuid,
    Map(Box<DataType>, Box<DataType>),
    Set(Box<DataType>),
    List(Box<DataType>),
}

impl DataType {
    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    pub fn set(elem: DataType) -> Self {
        DataType::Set(Box::new(elem))
    }

    pub fn list(elem: DataType) -> Self {
        DataType::List(Box::new(elem))
    }

    /// The value tag a non-null value of this type carries
    pub fn value_type(&self) -> ValueType {
        match self {
            DataType::TinyInt => ValueType::Int8,
            DataType::SmallInt => ValueType::Int16,
            DataType::Int => ValueType::Int32,
            DataType::BigInt => ValueType::Int64,
            DataType::Float => ValueType::Float,
            DataType::Double => ValueType::Double,
            DataType::Decimal => ValueType::Decimal,
            DataType::Boolean => ValueType::Bool,
            DataType::Text => ValueType::String,
            DataType::Blob => ValueType::Binary,
            DataType::Timestamp => ValueType::Timestamp,
            DataType::Inet => ValueType::Inet,
            DataType::Uuid => ValueType::Uuid,
            DataType::TimeUuid => ValueType::TimeUuid,
            DataType::Map(..) => ValueType::Map,
            DataType::Set(_) => ValueType::Set,
            DataType::List(_) => ValueType::List,
        }
    }

    /// Whether the wire encoding is a bare fixed-width payload with no length
    /// prefix (and therefore no way to express null)
    pub fn is_fixed_width(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt
                | DataType::SmallInt
                | DataType::Int
                | DataType::BigInt
                | DataType::Float
                | DataType::Double
                | DataType::Boolean
                | DataType::Timestamp
                | DataType::Uuid
                | DataType::TimeUuid
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, DataType::Map(..) | DataType::Set(_) | DataType::List(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::TinyInt => f.write_str("tinyint"),
            DataType::SmallInt => f.write_str("smallint"),
            DataType::Int => f.write_str("int"),
            DataType::BigInt => f.write_str("bigint"),
            DataType::Float => f.write_str("float"),
            DataType::Double => f.write_str("double"),
            DataType::Decimal => f.write_str("decimal"),
            DataType::Boolean => f.write_str("boolean"),
            DataType::Text => f.write_str("text"),
            DataType::Blob => f.write_str("blob"),
            DataType::Timestamp => f.write_str("timestamp"),
            DataType::Inet => f.write_str("inet"),
            DataType::Uuid => f.write_str("uuid"),
            DataType::TimeUuid => f.write_str("timeuuid"),
            DataType::Map(k, v) => write!(f, "map<{}, {}>", k, v),
            DataType::Set(e) => write!(f, "set<{}>", e),
            DataType::List(e) => write!(f, "list<{}>", e),
        }
    }
}

impl FromStr for DataType {
    type Err = QlError;

    /// Parse a CQL type name such as `int` or `map<text, list<int>>`
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(inner) = generic_args(&name, "map") {
            let (key, value) = split_top_level(inner).ok_or_else(|| {
                QlError::invalid_argument(format!("map type needs two arguments: {}", s))
            })?;
            return Ok(DataType::map(key.parse()?, value.parse()?));
        }
        if let Some(inner) = generic_args(&name, "set") {
            return Ok(DataType::set(inner.parse()?));
        }
        if let Some(inner) = generic_args(&name, "list") {
            return Ok(DataType::list(inner.parse()?));
        }

        match name.as_str() {
            "tinyint" => Ok(DataType::TinyInt),
            "smallint" => Ok(DataType::SmallInt),
            "int" => Ok(DataType::Int),
            "bigint" | "counter" => Ok(DataType::BigInt),
            "float" => Ok(DataType::Float),
            "double" => Ok(DataType::Double),
            "decimal" => Ok(DataType::Decimal),
            "boolean" => Ok(DataType::Boolean),
            "text" | "varchar" => Ok(DataType::Text),
            "blob" => Ok(DataType::Blob),
            "timestamp" => Ok(DataType::Timestamp),
            "inet" => Ok(DataType::Inet),
            "uuid" => Ok(DataType::Uuid),
            "timeuuid" => Ok(DataType::TimeUuid),
            _ => Err(QlError::invalid_argument(format!("unknown type: {}", s))),
        }
    }
}

/// `list<int>` -> `int` for the given generic name
fn generic_args<'a>(name: &'a str, generic: &str) -> Option<&'a str> {
    name.strip_prefix(generic)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// Split `a, b` at the one comma not nested inside angle brackets
fn split_top_level(args: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => return Some((&args[..i], &args[i + 1..])),
            _ => {}
        }
    }
    None
}
