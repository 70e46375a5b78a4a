//! Types Tests
//!
//! Tests for logical type names, value tags and timestamps.

use qlvalue::{DataType, QlError, Timestamp, ValueType};

// =============================================================================
// Type Names
// =============================================================================

#[test]
fn test_parse_scalar_names() {
    let cases = [
        ("tinyint", DataType::TinyInt),
        ("smallint", DataType::SmallInt),
        ("int", DataType::Int),
        ("bigint", DataType::BigInt),
        ("counter", DataType::BigInt),
        ("float", DataType::Float),
        ("double", DataType::Double),
        ("decimal", DataType::Decimal),
        ("boolean", DataType::Boolean),
        ("text", DataType::Text),
        ("varchar", DataType::Text),
        ("blob", DataType::Blob),
        ("timestamp", DataType::Timestamp),
        ("inet", DataType::Inet),
        ("uuid", DataType::Uuid),
        ("timeuuid", DataType::TimeUuid),
    ];

    for (name, expected) in cases {
        assert_eq!(name.parse::<DataType>().unwrap(), expected, "{}", name);
    }
}

#[test]
fn test_parse_is_case_and_space_insensitive() {
    assert_eq!(" TEXT ".parse::<DataType>().unwrap(), DataType::Text);
    assert_eq!(
        "Map < Text , List<Int> >".parse::<DataType>().unwrap(),
        DataType::map(DataType::Text, DataType::list(DataType::Int))
    );
}

#[test]
fn test_parse_nested_collections() {
    let parsed: DataType = "map<map<int, text>, set<list<uuid>>>".parse().unwrap();
    assert_eq!(
        parsed,
        DataType::map(
            DataType::map(DataType::Int, DataType::Text),
            DataType::set(DataType::list(DataType::Uuid)),
        )
    );
}

#[test]
fn test_parse_errors() {
    for bad in ["", "integer", "list<>", "map<int>", "set<int", "list<int, int>"] {
        let result = bad.parse::<DataType>();
        assert!(
            matches!(result, Err(QlError::InvalidArgument(_))),
            "{:?} parsed as {:?}",
            bad,
            result
        );
    }
}

#[test]
fn test_display_parses_back() {
    let types = [
        DataType::Decimal,
        DataType::list(DataType::TimeUuid),
        DataType::map(DataType::Text, DataType::set(DataType::Inet)),
    ];

    for data_type in types {
        let shown = data_type.to_string();
        assert_eq!(shown.parse::<DataType>().unwrap(), data_type);
    }
    assert_eq!(
        DataType::map(DataType::Text, DataType::Int).to_string(),
        "map<text, int>"
    );
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_value_type_mapping() {
    assert_eq!(DataType::TinyInt.value_type(), ValueType::Int8);
    assert_eq!(DataType::Text.value_type(), ValueType::String);
    assert_eq!(DataType::Blob.value_type(), ValueType::Binary);
    assert_eq!(DataType::Boolean.value_type(), ValueType::Bool);
    assert_eq!(DataType::list(DataType::Int).value_type(), ValueType::List);
    assert_eq!(ValueType::TimeUuid.to_string(), "timeuuid");
}

#[test]
fn test_fixed_width_classification() {
    assert!(DataType::Int.is_fixed_width());
    assert!(DataType::Timestamp.is_fixed_width());
    assert!(DataType::TimeUuid.is_fixed_width());
    assert!(!DataType::Decimal.is_fixed_width());
    assert!(!DataType::Inet.is_fixed_width());
    assert!(!DataType::set(DataType::Int).is_fixed_width());

    assert!(DataType::map(DataType::Int, DataType::Int).is_collection());
    assert!(!DataType::Blob.is_collection());
}

// =============================================================================
// Timestamp
// =============================================================================

#[test]
fn test_timestamp_millis() {
    let ts = Timestamp::from_millis(-1);
    assert_eq!(ts.as_millis(), -1);
    assert_eq!(Timestamp::from(5), Timestamp::from_millis(5));
    assert!(Timestamp::from_millis(1) > ts);
    assert_eq!(ts.to_string(), "-1");
}

#[test]
fn test_timestamp_now_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
}
