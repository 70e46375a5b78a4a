//! Comparison Tests
//!
//! Tests for ordering, comparability and null collapse of the relational
//! operators.

use std::cmp::Ordering;
use std::net::IpAddr;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use qlvalue::Value;
use uuid::Uuid;

fn decimal(text: &str) -> Value {
    let mut value = Value::null();
    value.set_decimal_value(&BigDecimal::from_str(text).unwrap()).unwrap();
    value
}

fn list(elems: &[i32]) -> Value {
    let mut value = Value::null();
    value.set_list_value();
    for n in elems {
        value.add_list_elem().set_int32_value(*n);
    }
    value
}

/// Exactly one of <, ==, > holds
fn assert_trichotomy(a: &Value, b: &Value) {
    let held = [a.less_than(b), a.equal_to(b), a.greater_than(b)]
        .iter()
        .filter(|held| **held)
        .count();
    assert_eq!(held, 1, "{} vs {}", a, b);
}

// =============================================================================
// Comparability
// =============================================================================

#[test]
fn test_comparable_same_tag_or_null() {
    let int = Value::from(1i32);
    let text = Value::from("1");
    let null = Value::null();

    assert!(int.comparable(&Value::from(2i32)));
    assert!(int.comparable(&null));
    assert!(null.comparable(&text));
    assert!(null.comparable(&null));
    assert!(!int.comparable(&text));
    assert!(!Value::from(1i32).comparable(&Value::from(1i64)));
}

#[test]
#[should_panic(expected = "cannot compare")]
fn test_compare_incomparable_panics() {
    let _ = Value::from(1i32).compare_to(&Value::from("1"));
}

#[test]
#[should_panic(expected = "cannot compare")]
fn test_relational_on_incomparable_panics() {
    let _ = Value::from(true).less_than(&Value::from(1i8));
}

// =============================================================================
// Scalar Ordering
// =============================================================================

#[test]
fn test_integer_ordering() {
    let a = Value::from(-5i64);
    let b = Value::from(7i64);

    assert_eq!(a.compare_to(&b), Some(Ordering::Less));
    assert_eq!(b.compare_to(&a), Some(Ordering::Greater));
    assert_eq!(a.compare_to(&a.clone()), Some(Ordering::Equal));
    assert!(a.less_than(&b));
    assert!(a.less_equal(&b));
    assert!(b.greater_equal(&a));
    assert!(a.not_equal_to(&b));
}

#[test]
fn test_float_ordering() {
    assert!(Value::from(-0.5f32).less_than(&Value::from(0.25f32)));
    assert!(Value::from(0.0f64).equal_to(&Value::from(-0.0f64)));

    // NaN still lands somewhere in a total order
    let nan = Value::from(f64::NAN);
    let one = Value::from(1.0f64);
    assert_trichotomy(&nan, &one);
    assert!(nan.equal_to(&Value::from(f64::NAN)));
}

#[test]
fn test_string_ordering_is_bytewise() {
    assert!(Value::from("B").less_than(&Value::from("a")));
    assert!(Value::from("ab").less_than(&Value::from("abc")));
    assert!(Value::from("é").greater_than(&Value::from("z")));
}

#[test]
fn test_bool_ordering() {
    assert!(Value::from(false).less_than(&Value::from(true)));
}

#[test]
fn test_decimal_ordering_ignores_scale() {
    assert!(decimal("1.0").equal_to(&decimal("1.000")));
    assert!(decimal("-2").less_than(&decimal("0.5")));
    assert!(decimal("100").greater_than(&decimal("99.99")));
}

#[test]
fn test_decimal_ordering_across_scales() {
    let tiny = decimal("0.000000000000000000000000000001");
    assert!(tiny.greater_than(&decimal("0")));
    assert!(tiny.less_than(&decimal("0.00000000000000000000000000001")));
    assert!(tiny.equal_to(&decimal("0.0000000000000000000000000000010")));
    assert!(decimal("-0.000000000000000000000000000001").less_than(&decimal("0")));
}

#[test]
fn test_decimal_negative_scale_orders_numerically() {
    let mut scaled = Value::null();
    // 7 * 10^5 with scale -5
    scaled.set_decimal_bytes(vec![0xFF, 0xFF, 0xFF, 0xFB, 0x07]).unwrap();

    assert!(scaled.equal_to(&decimal("700000")));
    assert!(scaled.equal_to(&decimal("700000.00")));
    assert!(scaled.less_than(&decimal("700001")));
    assert!(scaled.greater_than(&decimal("69999.999")));
}

#[test]
fn test_decimal_ordering_beyond_128_bits() {
    let two_100 = decimal("1267650600228229401496703205376");
    let two_99 = decimal("633825300114114700748351602688");
    let max_96 = decimal("79228162514264337593543950335");
    let small = decimal("-1.5");

    assert!(two_100.greater_than(&two_99));
    assert!(two_99.greater_than(&max_96));
    assert!(max_96.greater_than(&small));
    assert!(two_100.greater_than(&small));
    assert!(decimal("-1267650600228229401496703205376").less_than(&small));

    let values = [&two_100, &two_99, &max_96, &small];
    for a in values {
        for b in values {
            assert_trichotomy(a, b);
        }
    }
}

#[test]
fn test_malformed_decimal_sorts_first() {
    let mut bad = Value::null();
    bad.mutable_decimal_value().extend_from_slice(&[0, 1]);

    let most_negative = decimal("-1267650600228229401496703205376");
    assert_eq!(bad.compare_to(&most_negative), Some(Ordering::Less));
    assert_eq!(most_negative.compare_to(&bad), Some(Ordering::Greater));
    assert_eq!(bad.compare_to(&bad.clone()), Some(Ordering::Equal));
}

#[test]
fn test_uuid_ordering_is_unsigned() {
    let low = Value::from(Uuid::from_u128(1));
    let high = Value::from(Uuid::from_u128(u128::MAX));

    assert!(low.less_than(&high));
    assert_eq!(high.compare_to(&low), Some(Ordering::Greater));
}

#[test]
fn test_timeuuid_ordering() {
    let mut a = Value::null();
    a.set_timeuuid_value(Uuid::parse_str("00000000-0000-1000-8000-000000000001").unwrap())
        .unwrap();
    let mut b = Value::null();
    b.set_timeuuid_value(Uuid::parse_str("00000000-0000-1000-8000-000000000002").unwrap())
        .unwrap();

    assert!(a.less_than(&b));
}

#[test]
fn test_inet_ordering_is_bytewise() {
    let a = Value::from("10.0.0.2".parse::<IpAddr>().unwrap());
    let b = Value::from("10.0.0.10".parse::<IpAddr>().unwrap());
    assert!(a.less_than(&b));
}

#[test]
fn test_ordering_is_transitive_and_antisymmetric() {
    let values: Vec<Value> = [3i32, -1, 7, 0, 7].iter().map(|n| Value::from(*n)).collect();

    for a in &values {
        for b in &values {
            assert_trichotomy(a, b);
            assert_eq!(a.compare_to(b), b.compare_to(a).map(Ordering::reverse));
            for c in &values {
                if a.less_equal(b) && b.less_equal(c) {
                    assert!(a.less_equal(c));
                }
            }
        }
    }
}

#[test]
fn test_sort_with_compare_to() {
    let mut values: Vec<Value> = ["pear", "apple", "fig"].iter().map(|s| Value::from(*s)).collect();
    values.sort_by(|a, b| a.compare_to(b).unwrap_or(Ordering::Equal));

    let sorted: Vec<&str> = values.iter().map(Value::string_value).collect();
    assert_eq!(sorted, vec!["apple", "fig", "pear"]);
}

// =============================================================================
// Null Collapse
// =============================================================================

#[test]
fn test_null_relational_operators_are_false() {
    let null = Value::null();
    let one = Value::from(1i32);

    for (a, b) in [(&null, &one), (&one, &null), (&null, &null)] {
        assert!(!a.less_than(b));
        assert!(!a.greater_than(b));
        assert!(!a.less_equal(b));
        assert!(!a.greater_equal(b));
        assert!(!a.equal_to(b));
        assert!(!a.not_equal_to(b));
        assert_eq!(a.compare_to(b), None);
    }
}

#[test]
fn test_structural_equality_differs_from_sql_equality() {
    // Record identity: two nulls are the same record
    assert_eq!(Value::null(), Value::null());
    // SQL equality: null never equals anything
    assert!(!Value::null().equal_to(&Value::null()));
}

// =============================================================================
// Collections
// =============================================================================

#[test]
fn test_collection_equality() {
    assert!(list(&[1, 2, 3]).equal_to(&list(&[1, 2, 3])));
    assert!(list(&[1, 2]).not_equal_to(&list(&[1, 2, 3])));
}

#[test]
fn test_unequal_collections_are_unordered() {
    let a = list(&[1]);
    let b = list(&[2]);

    assert_eq!(a.compare_to(&b), None);
    assert!(!a.less_than(&b));
    assert!(!a.greater_than(&b));
    assert!(!a.equal_to(&b));
    assert!(a.not_equal_to(&b));
}

#[test]
fn test_map_equality_uses_value_semantics() {
    let mut a = Value::null();
    a.add_map_key().set_string_value("price");
    a.add_map_value().set_decimal_value(&BigDecimal::from_str("1.50").unwrap()).unwrap();

    let mut b = Value::null();
    b.add_map_key().set_string_value("price");
    b.add_map_value().set_decimal_value(&BigDecimal::from_str("1.5").unwrap()).unwrap();

    assert!(a.equal_to(&b));
    // Different bytes, so not structurally identical
    assert_ne!(a, b);
}

#[test]
fn test_null_elements_in_collections() {
    let mut a = Value::null();
    a.add_list_elem();
    let mut b = Value::null();
    b.add_list_elem();

    assert!(a.equal_to(&b));
    assert!(a.not_equal_to(&list(&[1])));
}
