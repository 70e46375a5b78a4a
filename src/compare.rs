//! Comparison of values
//!
//! Ordering is defined only between comparable values: the same tag, or at
//! least one side null. Comparing two different non-null tags is a caller
//! bug and panics.
//!
//! ## Ordering by Tag
//! - integers, timestamp, bool: natural order (`false < true`)
//! - float/double: numeric order, `-0.0 == 0.0`; NaN falls back to the IEEE
//!   total order so the result stays total
//! - decimal: numeric value, whatever the encoded width or scale (including
//!   negative scales and unscaled values wider than 128 bits)
//! - string/binary: byte-wise lexicographic
//! - inet: byte-wise on the canonical address bytes
//! - uuid/timeuuid: as unsigned 128-bit integers
//! - map/set/list: `Equal` when element-wise equal, otherwise unordered
//!
//! ## Null
//! [`Value::compare_to`] returns `None` when either side is null. Every
//! relational method (`less_than` .. `not_equal_to`) is `false` unless both
//! sides are non-null. Callers that need three-valued logic check
//! [`Value::is_null`] first.

use std::cmp::Ordering;

use crate::types::decimal;
use crate::value::{Payload, Value};

impl Value {
    // =========================================================================
    // Comparability
    // =========================================================================

    /// Same tag, or either side null
    pub fn comparable(&self, other: &Value) -> bool {
        self.value_type() == other.value_type() || self.either_is_null(other)
    }

    pub fn both_not_null(&self, other: &Value) -> bool {
        !self.is_null() && !other.is_null()
    }

    pub fn either_is_null(&self, other: &Value) -> bool {
        self.is_null() || other.is_null()
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Compare two comparable values
    ///
    /// Returns `None` if either side is null or for collections that are not
    /// equal. Panics if the values are not [comparable](Value::comparable).
    #[track_caller]
    pub fn compare_to(&self, other: &Value) -> Option<Ordering> {
        assert!(
            self.comparable(other),
            "cannot compare {} with {}",
            self.type_name(),
            other.type_name()
        );

        let (lhs, rhs) = match (self.payload(), other.payload()) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            _ => return None,
        };

        let ordering = match (lhs, rhs) {
            (Payload::Int8(a), Payload::Int8(b)) => a.cmp(b),
            (Payload::Int16(a), Payload::Int16(b)) => a.cmp(b),
            (Payload::Int32(a), Payload::Int32(b)) => a.cmp(b),
            (Payload::Int64(a), Payload::Int64(b)) => a.cmp(b),
            (Payload::Float(a), Payload::Float(b)) => cmp_float(f64::from(*a), f64::from(*b)),
            (Payload::Double(a), Payload::Double(b)) => cmp_float(*a, *b),
            (Payload::Decimal(a), Payload::Decimal(b)) => cmp_decimal(a, b),
            (Payload::Bool(a), Payload::Bool(b)) => a.cmp(b),
            (Payload::String(a), Payload::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Payload::Timestamp(a), Payload::Timestamp(b)) => a.cmp(b),
            (Payload::Binary(a), Payload::Binary(b)) => a.cmp(b),
            (Payload::Inet(a), Payload::Inet(b)) => a.cmp(b),
            (Payload::Uuid(a), Payload::Uuid(b)) | (Payload::TimeUuid(a), Payload::TimeUuid(b)) => {
                u128::from_be_bytes(*a).cmp(&u128::from_be_bytes(*b))
            }
            (Payload::Map(a), Payload::Map(b)) => {
                let equal = seq_equal(&a.keys, &b.keys) && seq_equal(&a.values, &b.values);
                return equal.then_some(Ordering::Equal);
            }
            (Payload::Set(a), Payload::Set(b)) | (Payload::List(a), Payload::List(b)) => {
                return seq_equal(a, b).then_some(Ordering::Equal);
            }
            _ => unreachable!("comparable non-null values share a tag"),
        };
        Some(ordering)
    }

    // =========================================================================
    // Relational Operators
    // =========================================================================
    // All of these collapse a null operand to `false`.

    pub fn less_than(&self, other: &Value) -> bool {
        self.both_not_null(other) && self.compare_to(other) == Some(Ordering::Less)
    }

    pub fn greater_than(&self, other: &Value) -> bool {
        self.both_not_null(other) && self.compare_to(other) == Some(Ordering::Greater)
    }

    pub fn less_equal(&self, other: &Value) -> bool {
        self.both_not_null(other)
            && matches!(self.compare_to(other), Some(Ordering::Less | Ordering::Equal))
    }

    pub fn greater_equal(&self, other: &Value) -> bool {
        self.both_not_null(other)
            && matches!(self.compare_to(other), Some(Ordering::Greater | Ordering::Equal))
    }

    pub fn equal_to(&self, other: &Value) -> bool {
        self.both_not_null(other) && self.compare_to(other) == Some(Ordering::Equal)
    }

    pub fn not_equal_to(&self, other: &Value) -> bool {
        self.both_not_null(other) && self.compare_to(other) != Some(Ordering::Equal)
    }
}

fn cmp_float(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Numeric order at any precision and scale
///
/// Bytes that do not decode (only reachable through the mutable buffer)
/// sort below every real decimal and among themselves by bytes, which keeps
/// the order total.
fn cmp_decimal(a: &[u8], b: &[u8]) -> Ordering {
    match (decimal::decode(a), decimal::decode(b)) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Err(_), Err(_)) => a.cmp(b),
        (Err(_), Ok(_)) => Ordering::Less,
        (Ok(_), Err(_)) => Ordering::Greater,
    }
}

/// Element-wise equality inside collections; two null elements are equal
fn seq_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| match (x.is_null(), y.is_null()) {
            (true, true) => true,
            (false, false) => x.comparable(y) && x.compare_to(y) == Some(Ordering::Equal),
            _ => false,
        })
}
