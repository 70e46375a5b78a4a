//! Row Module
//!
//! Schemas and rows for tables materialized in memory (system and virtual
//! tables), plus the by-name cell setter they are filled with.
//!
//! ```text
//! let schema = Schema::new(vec![
//!     ColumnSchema::new("key", DataType::Text),
//!     ColumnSchema::new("rpc_address", DataType::Inet),
//! ]);
//! let mut row = Row::new(&schema);
//! set_column_value(&schema, "key", "local", &mut row)?;
//! ```

mod convert;

pub use convert::ColumnValue;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{QlError, Result};
use crate::types::DataType;
use crate::value::Value;

// =============================================================================
// Schema
// =============================================================================

/// One named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered column list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column called `name`
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, index: usize) -> Option<&ColumnSchema> {
        self.columns.get(index)
    }
}

// =============================================================================
// Row
// =============================================================================

/// One value per schema column, all null to begin with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<Value>,
}

impl Row {
    pub fn new(schema: &Schema) -> Self {
        Self {
            columns: vec![Value::null(); schema.num_columns()],
        }
    }

    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Value> {
        self.columns.get(index)
    }

    pub fn mutable_column(&mut self, index: usize) -> Option<&mut Value> {
        self.columns.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// =============================================================================
// By-name Setter
// =============================================================================

/// Convert `value` to the type of column `name` and store it in `row`
///
/// Fails with `NotFound` if the schema has no such column, and with
/// `InvalidArgument` if the value cannot be represented in the column's type
/// or the row was not built for this schema.
pub fn set_column_value<T: ColumnValue>(
    schema: &Schema,
    name: &str,
    value: T,
    row: &mut Row,
) -> Result<()> {
    let index = schema
        .find_column(name)
        .ok_or_else(|| QlError::NotFound(format!("Couldn't find column {} in schema", name)))?;
    let column = &schema.columns[index];

    let converted = value.to_value(&column.data_type)?;
    let row_len = row.len();
    let cell = row.mutable_column(index).ok_or_else(|| {
        QlError::invalid_argument(format!(
            "row has {} columns, schema column {} is at index {}",
            row_len, name, index
        ))
    })?;

    trace!(column = name, value = %converted, "setting column value");
    *cell = converted;
    Ok(())
}
