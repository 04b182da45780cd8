use std::cmp::Ordering;

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn literals_follow_node_kind() {
    assert_eq!(Value::from_literal(NodeKind::Integer, "42"), Value::Int(42));
    assert_eq!(
        Value::from_literal(NodeKind::Serial, "0x4001"),
        Value::Serial(0x4001)
    );
    assert_eq!(Value::from_literal(NodeKind::Double, "2.5"), Value::Double(2.5));
    assert_eq!(
        Value::from_literal(NodeKind::String, "42"),
        Value::Str("42".to_string())
    );
    assert_eq!(
        Value::from_literal(NodeKind::Operand, "name"),
        Value::Str("name".to_string())
    );
}

#[test]
fn parse_number_variants() {
    assert_eq!(Value::parse_number("0x10"), Some(Value::Serial(16)));
    assert_eq!(Value::parse_number("-7"), Some(Value::Int(-7)));
    assert_eq!(Value::parse_number("1.25"), Some(Value::Double(1.25)));
    assert_eq!(Value::parse_number("nan"), None);
    assert_eq!(Value::parse_number("abc"), None);
}

#[test]
fn integer_conversions() {
    assert_eq!(Value::Str("12".into()).to_int().unwrap(), 12);
    assert_eq!(Value::Double(3.9).to_int().unwrap(), 3);
    assert_eq!(Value::Bool(true).to_int().unwrap(), 1);
    assert!(Value::Str("twelve".into()).to_int().is_err());
    assert!(Value::Int(-1).to_uint().is_err());
    assert_eq!(Value::Int(70_000).to_uint().unwrap(), 70_000);
    assert!(Value::Int(70_000).to_ushort().is_err());
    assert_eq!(Value::Int(300).to_ushort().unwrap(), 300);
}

#[test]
fn serial_conversions() {
    assert_eq!(Value::Str("0x40000001".into()).to_serial().unwrap(), 0x4000_0001);
    assert_eq!(Value::Int(5).to_serial().unwrap(), 5);
    let err = Value::Int(-5).to_serial().unwrap_err();
    assert_eq!(err.message, "cannot convert `-5` to serial");
}

#[test]
fn bool_conversions() {
    assert!(Value::Str("TRUE".into()).to_bool().unwrap());
    assert!(!Value::Str("0".into()).to_bool().unwrap());
    assert!(Value::Serial(9).to_bool().unwrap());
    assert!(Value::Str("maybe".into()).to_bool().is_err());
}

#[test]
fn display_forms() {
    assert_eq!(Value::Serial(0xABC).to_string(), "0xABC");
    assert_eq!(Value::Double(0.5).to_string(), "0.5");
    assert_eq!(Value::Bool(false).to_string(), "false");
}

#[test]
fn bool_against_number_coerces_number() {
    assert_eq!(
        compare(&Value::Int(0), &Value::Bool(false)).unwrap(),
        Ordering::Equal
    );
    assert_eq!(
        compare(&Value::Int(5), &Value::Bool(true)).unwrap(),
        Ordering::Equal
    );
    assert_eq!(
        compare(&Value::Bool(true), &Value::Double(0.0)).unwrap(),
        Ordering::Greater
    );
    // Bool words in text count as bools.
    assert!(loosely_equal(&Value::Int(7), &Value::from("true")));
    assert!(loosely_equal(&Value::from("FALSE"), &Value::Serial(0)));
}

#[test]
fn numeric_widening() {
    assert_eq!(
        compare(&Value::Int(2), &Value::Double(2.0)).unwrap(),
        Ordering::Equal
    );
    assert_eq!(
        compare(&Value::Serial(0xFFFF_FFFF), &Value::Int(-1)).unwrap(),
        Ordering::Greater
    );
    assert_eq!(
        compare(&Value::Int(3), &Value::Str("0x3".into())).unwrap(),
        Ordering::Equal
    );
}

#[test]
fn text_comparisons() {
    assert_eq!(
        compare(&Value::from("abc"), &Value::from("abd")).unwrap(),
        Ordering::Less
    );
    assert!(compare(&Value::from("abc"), &Value::Int(1)).is_err());
    assert!(loosely_equal(&Value::from("true"), &Value::Bool(true)));
    assert!(!loosely_equal(&Value::from("abc"), &Value::Int(1)));
}

#[test]
fn relational_operators() {
    let one = Value::Int(1);
    let two = Value::Int(2);
    assert!(relational(NodeKind::LessThan, &one, &two).unwrap());
    assert!(relational(NodeKind::LessThanOrEqual, &two, &two).unwrap());
    assert!(relational(NodeKind::NotEqual, &one, &two).unwrap());
    assert!(!relational(NodeKind::GreaterThanOrEqual, &one, &two).unwrap());
    assert!(relational(NodeKind::GreaterThan, &two, &one).unwrap());
    assert!(relational(NodeKind::Equal, &one, &Value::Bool(true)).unwrap());
}

proptest::proptest! {
    #[test]
    fn integer_comparison_matches_native(a in proptest::num::i32::ANY, b in proptest::num::i32::ANY) {
        proptest::prop_assert_eq!(compare(&Value::Int(a), &Value::Int(b)).ok(), Some(a.cmp(&b)));
        let text = Value::Str(b.to_string());
        proptest::prop_assert_eq!(compare(&Value::Int(a), &text).ok(), Some(a.cmp(&b)));
    }
}
