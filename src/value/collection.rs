//! Collection values
//!
//! Collections are built in two phases:
//! 1. `set_map_value` / `set_set_value` / `set_list_value` switch the tag and
//!    start from empty storage
//! 2. `add_*` appends one null element and hands it back to be populated
//!
//! ```text
//! let mut v = Value::null();
//! v.set_list_value();
//! v.add_list_elem().set_int32_value(1);
//! v.add_list_elem().set_int32_value(2);
//! ```
//!
//! Sets are neither sorted nor deduplicated here.

use serde::{Deserialize, Serialize};

use super::accessors::payload_mut;
use super::{Payload, Value};
use crate::types::ValueType;

/// Map payload: index-aligned keys and values
///
/// Key order is insertion order and defines the pairing; it says nothing
/// about sortedness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    pub(crate) keys: Vec<Value>,
    pub(crate) values: Vec<Value>,
}

impl MapValue {
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of complete key/value pairs
    pub fn len(&self) -> usize {
        self.keys.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate pairs in key-sequence order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.keys.iter().zip(self.values.iter())
    }
}

/// Append a null element and return it
fn push_null(seq: &mut Vec<Value>) -> &mut Value {
    seq.push(Value::null());
    let last = seq.len() - 1;
    &mut seq[last]
}

impl Value {
    // =========================================================================
    // Tag Switches
    // =========================================================================

    /// Make this an empty map
    pub fn set_map_value(&mut self) {
        self.payload = Some(Payload::Map(MapValue::default()));
    }

    /// Make this an empty set
    pub fn set_set_value(&mut self) {
        self.payload = Some(Payload::Set(Vec::new()));
    }

    /// Make this an empty list
    pub fn set_list_value(&mut self) {
        self.payload = Some(Payload::List(Vec::new()));
    }

    // =========================================================================
    // Append-and-populate
    // =========================================================================
    // Appending to a value that holds another tag switches it to an empty
    // collection first.

    pub fn add_map_key(&mut self) -> &mut Value {
        let map = payload_mut!(self, Map, MapValue::default());
        push_null(&mut map.keys)
    }

    pub fn add_map_value(&mut self) -> &mut Value {
        let map = payload_mut!(self, Map, MapValue::default());
        push_null(&mut map.values)
    }

    pub fn add_set_elem(&mut self) -> &mut Value {
        push_null(payload_mut!(self, Set, Vec::new()))
    }

    pub fn add_list_elem(&mut self) -> &mut Value {
        push_null(payload_mut!(self, List, Vec::new()))
    }

    // =========================================================================
    // Getters
    // =========================================================================

    #[track_caller]
    pub fn map_value(&self) -> &MapValue {
        match &self.payload {
            Some(Payload::Map(map)) => map,
            _ => self.tag_mismatch(ValueType::Map),
        }
    }

    #[track_caller]
    pub fn set_value(&self) -> &[Value] {
        match &self.payload {
            Some(Payload::Set(elems)) => elems,
            _ => self.tag_mismatch(ValueType::Set),
        }
    }

    #[track_caller]
    pub fn list_value(&self) -> &[Value] {
        match &self.payload {
            Some(Payload::List(elems)) => elems,
            _ => self.tag_mismatch(ValueType::List),
        }
    }
}
