//! Row Tests
//!
//! Tests for schemas, rows and the by-name column setter.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use qlvalue::{
    set_column_value, ColumnSchema, ColumnValue, DataType, QlError, Row, Schema, Timestamp, Value,
    ValueType,
};
use uuid::Uuid;

/// A cut-down `system.local` table
fn local_schema() -> Schema {
    Schema::new(vec![
        ColumnSchema::new("key", DataType::Text),
        ColumnSchema::new("rpc_address", DataType::Inet),
        ColumnSchema::new("host_id", DataType::Uuid),
        ColumnSchema::new("schema_version", DataType::TimeUuid),
        ColumnSchema::new("native_protocol_version", DataType::TinyInt),
        ColumnSchema::new("tokens", DataType::set(DataType::Text)),
        ColumnSchema::new("load", DataType::Double),
        ColumnSchema::new("truncated_at", DataType::map(DataType::Text, DataType::Timestamp)),
    ])
}

// =============================================================================
// Schema and Row
// =============================================================================

#[test]
fn test_schema_lookup() {
    let schema = local_schema();

    assert_eq!(schema.num_columns(), 8);
    assert_eq!(schema.find_column("host_id"), Some(2));
    assert_eq!(schema.find_column("missing"), None);
    assert_eq!(schema.column(1).unwrap().data_type, DataType::Inet);
    assert!(schema.column(8).is_none());
}

#[test]
fn test_new_row_is_all_null() {
    let row = Row::new(&local_schema());

    assert_eq!(row.len(), 8);
    assert!(row.columns().iter().all(Value::is_null));
    assert!(row.column(8).is_none());
}

// =============================================================================
// set_column_value
// =============================================================================

#[test]
fn test_set_column_value_fills_row() {
    let schema = local_schema();
    let mut row = Row::new(&schema);

    set_column_value(&schema, "key", "local", &mut row).unwrap();
    set_column_value(&schema, "rpc_address", "10.1.2.3", &mut row).unwrap();
    set_column_value(&schema, "native_protocol_version", 4i32, &mut row).unwrap();
    set_column_value(&schema, "tokens", vec!["-9223372036854775808"], &mut row).unwrap();
    set_column_value(&schema, "load", 0.5f64, &mut row).unwrap();

    assert_eq!(row.column(0).unwrap().string_value(), "local");
    assert_eq!(
        row.column(1).unwrap().inetaddress_value(),
        "10.1.2.3".parse::<IpAddr>().unwrap()
    );
    assert_eq!(row.column(4).unwrap().int8_value(), 4);
    assert_eq!(row.column(5).unwrap().set_value().len(), 1);
    assert_eq!(row.column(6).unwrap().double_value(), 0.5);
    // Untouched columns stay null
    assert!(row.column(2).unwrap().is_null());
}

#[test]
fn test_set_column_value_unknown_column() {
    let schema = local_schema();
    let mut row = Row::new(&schema);

    let result = set_column_value(&schema, "data_center", "dc1", &mut row);
    match result {
        Err(QlError::NotFound(msg)) => {
            assert_eq!(msg, "Couldn't find column data_center in schema")
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(row.columns().iter().all(Value::is_null));
}

#[test]
fn test_set_column_value_overwrites() {
    let schema = local_schema();
    let mut row = Row::new(&schema);

    set_column_value(&schema, "key", "first", &mut row).unwrap();
    set_column_value(&schema, "key", "second".to_string(), &mut row).unwrap();
    assert_eq!(row.column(0).unwrap().string_value(), "second");

    set_column_value(&schema, "key", None::<&str>, &mut row).unwrap();
    assert!(row.column(0).unwrap().is_null());
}

#[test]
fn test_set_column_value_conversion_failure_leaves_cell() {
    let schema = local_schema();
    let mut row = Row::new(&schema);
    set_column_value(&schema, "native_protocol_version", 4i32, &mut row).unwrap();

    let result = set_column_value(&schema, "native_protocol_version", 300i32, &mut row);
    assert!(matches!(result, Err(QlError::InvalidArgument(_))));
    assert_eq!(row.column(4).unwrap().int8_value(), 4);
}

#[test]
fn test_set_column_value_short_row() {
    let schema = local_schema();
    let mut row = Row::new(&Schema::new(vec![ColumnSchema::new("key", DataType::Text)]));

    let result = set_column_value(&schema, "load", 1.0f64, &mut row);
    assert!(matches!(result, Err(QlError::InvalidArgument(_))));
}

#[test]
fn test_set_column_value_uuids() {
    let schema = local_schema();
    let mut row = Row::new(&schema);
    let host_id = Uuid::parse_str("7d444840-9dc0-4a1b-9a0c-6f9c1a3b2c4d").unwrap();

    set_column_value(&schema, "host_id", host_id, &mut row).unwrap();
    set_column_value(
        &schema,
        "schema_version",
        "e3b1d2a0-4f7c-11ee-be56-0242ac120002",
        &mut row,
    )
    .unwrap();

    assert_eq!(row.column(2).unwrap().uuid_value(), host_id);
    assert_eq!(row.column(3).unwrap().value_type(), Some(ValueType::TimeUuid));

    // A random uuid is not a timeuuid
    let result = set_column_value(&schema, "schema_version", host_id, &mut row);
    assert!(matches!(result, Err(QlError::InvalidArgument(_))));
}

#[test]
fn test_set_column_value_map() {
    let schema = local_schema();
    let mut row = Row::new(&schema);

    let mut truncated = BTreeMap::new();
    truncated.insert("a", Timestamp::from_millis(10));
    truncated.insert("b", Timestamp::from_millis(20));
    set_column_value(&schema, "truncated_at", truncated, &mut row).unwrap();

    let map = row.column(7).unwrap().map_value();
    assert_eq!(map.len(), 2);
    let pairs: Vec<(&str, i64)> = map
        .iter()
        .map(|(k, v)| (k.string_value(), v.timestamp_value().as_millis()))
        .collect();
    assert_eq!(pairs, vec![("a", 10), ("b", 20)]);
}

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn test_integer_range_checks() {
    assert_eq!(127i64.to_value(&DataType::TinyInt).unwrap().int8_value(), 127);
    assert!(128i64.to_value(&DataType::TinyInt).is_err());
    assert!((-32769i32).to_value(&DataType::SmallInt).is_err());
    assert!(u32::MAX.to_value(&DataType::Int).is_err());
    assert_eq!(u32::MAX.to_value(&DataType::BigInt).unwrap().int64_value(), 4_294_967_295);
}

#[test]
fn test_integer_widening() {
    assert_eq!(3i32.to_value(&DataType::Double).unwrap().double_value(), 3.0);
    assert_eq!(
        7i32.to_value(&DataType::Decimal).unwrap().decimal_value(),
        BigDecimal::from(7i64)
    );
    assert_eq!(
        1_000i64.to_value(&DataType::Timestamp).unwrap().timestamp_value(),
        Timestamp::from_millis(1_000)
    );
    assert!(matches!(
        1i32.to_value(&DataType::Text),
        Err(QlError::InvalidArgument(_))
    ));
}

#[test]
fn test_string_conversions() {
    assert_eq!("ab".to_value(&DataType::Blob).unwrap().binary_value(), b"ab");
    assert_eq!(
        "2.50".to_value(&DataType::Decimal).unwrap().decimal_value(),
        BigDecimal::from_str("2.50").unwrap()
    );
    assert!("not an address".to_value(&DataType::Inet).is_err());
    assert!("nope".to_value(&DataType::Uuid).is_err());
    assert!("true".to_value(&DataType::Boolean).is_err());
}

#[test]
fn test_byte_conversions() {
    let bytes: &[u8] = &[192, 168, 0, 1];
    assert_eq!(
        bytes.to_value(&DataType::Inet).unwrap().inetaddress_value(),
        "192.168.0.1".parse::<IpAddr>().unwrap()
    );
    assert_eq!(bytes.to_value(&DataType::Blob).unwrap().binary_value(), bytes);

    let bad: &[u8] = &[1, 2, 3];
    assert!(matches!(bad.to_value(&DataType::Inet), Err(QlError::InvalidArgument(_))));
}

#[test]
fn test_value_passthrough_checks_tag() {
    assert!(Value::from(1i32).to_value(&DataType::Int).is_ok());
    assert!(Value::null().to_value(&DataType::Int).unwrap().is_null());
    assert!(matches!(
        Value::from(1i64).to_value(&DataType::Int),
        Err(QlError::InvalidArgument(_))
    ));
}

#[test]
fn test_nested_vec_conversion() {
    let data_type = DataType::list(DataType::set(DataType::Int));
    let value = vec![vec![1i32, 2], vec![3]].to_value(&data_type).unwrap();

    let outer = value.list_value();
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0].set_value().len(), 2);
    assert_eq!(outer[1].set_value()[0].int32_value(), 3);

    // Element conversion errors propagate
    assert!(vec![1i64 << 40].to_value(&DataType::list(DataType::Int)).is_err());
    assert!(vec![1i32].to_value(&DataType::Int).is_err());
}

#[test]
fn test_option_elements_become_nulls() {
    let value = vec![Some(1i32), None].to_value(&DataType::list(DataType::Int)).unwrap();
    assert!(value.list_value()[1].is_null());
}
