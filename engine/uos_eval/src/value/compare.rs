//! Mixed-type comparison.
//!
//! Coercion rules, applied pairwise:
//! - bool against a number: the number becomes a bool (nonzero is true),
//!   never the other way around
//! - number against number: both `i64`, or both `f64` if either is a double
//! - `true`/`false` text counts as a bool
//! - other text against a number or bool: the text is parsed, and failing
//!   that the comparison is an error
//! - text against text: ordinal
//!
//! `false < true` when ordering bools.

use std::cmp::Ordering;

use uos_ir::NodeKind;

use super::{parse_bool, Value};
use crate::errors::{type_mismatch, EvalResult};

#[derive(Copy, Clone)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn truthy(self) -> bool {
        match self {
            Num::Int(i) => i != 0,
            Num::Float(f) => f != 0.0,
        }
    }
}

enum Side<'a> {
    Bool(bool),
    Num(Num),
    Text(&'a str),
}

fn side(value: &Value) -> Side<'_> {
    match value {
        Value::Bool(b) => Side::Bool(*b),
        Value::Int(i) => Side::Num(Num::Int(i64::from(*i))),
        Value::Serial(s) => Side::Num(Num::Int(i64::from(*s))),
        Value::Double(d) => Side::Num(Num::Float(*d)),
        Value::Str(s) => Side::Text(s),
    }
}

fn text_as_num(text: &str) -> Option<Num> {
    match side(&Value::parse_number(text)?) {
        Side::Num(n) => Some(n),
        Side::Bool(_) | Side::Text(_) => None,
    }
}

fn text_as_bool(text: &str) -> Option<bool> {
    parse_bool(text).or_else(|| text_as_num(text).map(Num::truthy))
}

fn compare_nums(lhs: Num, rhs: Num) -> Option<Ordering> {
    match (lhs, rhs) {
        (Num::Int(a), Num::Int(b)) => Some(a.cmp(&b)),
        (Num::Int(a), Num::Float(b)) => to_f64(a).partial_cmp(&b),
        (Num::Float(a), Num::Int(b)) => a.partial_cmp(&to_f64(b)),
        (Num::Float(a), Num::Float(b)) => a.partial_cmp(&b),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "script integers come from i32 or u32 and are exact in f64"
)]
fn to_f64(i: i64) -> f64 {
    i as f64
}

/// Order two values under the coercion rules.
pub fn compare(lhs: &Value, rhs: &Value) -> EvalResult<Ordering> {
    let ordering = match (side(lhs), side(rhs)) {
        (Side::Bool(a), Side::Bool(b)) => Some(a.cmp(&b)),
        (Side::Bool(a), Side::Num(n)) => Some(a.cmp(&n.truthy())),
        (Side::Num(n), Side::Bool(b)) => Some(n.truthy().cmp(&b)),
        (Side::Bool(a), Side::Text(t)) => text_as_bool(t).map(|b| a.cmp(&b)),
        (Side::Text(t), Side::Bool(b)) => text_as_bool(t).map(|a| a.cmp(&b)),
        (Side::Num(a), Side::Num(b)) => compare_nums(a, b),
        (Side::Num(a), Side::Text(t)) => match parse_bool(t) {
            Some(b) => Some(a.truthy().cmp(&b)),
            None => text_as_num(t).and_then(|b| compare_nums(a, b)),
        },
        (Side::Text(t), Side::Num(b)) => match parse_bool(t) {
            Some(a) => Some(a.cmp(&b.truthy())),
            None => text_as_num(t).and_then(|a| compare_nums(a, b)),
        },
        (Side::Text(a), Side::Text(b)) => Some(a.cmp(b)),
    };
    ordering.ok_or_else(|| type_mismatch(&lhs.to_string(), &rhs.to_string()))
}

/// Equality under the coercion rules. Incomparable values are unequal.
pub fn loosely_equal(lhs: &Value, rhs: &Value) -> bool {
    matches!(compare(lhs, rhs), Ok(Ordering::Equal))
}

/// Apply a relational operator node kind.
///
/// Kinds other than the six relational operators compare as not-equal.
pub fn relational(op: NodeKind, lhs: &Value, rhs: &Value) -> EvalResult<bool> {
    let ordering = compare(lhs, rhs)?;
    Ok(match op {
        NodeKind::Equal => ordering == Ordering::Equal,
        NodeKind::NotEqual => ordering != Ordering::Equal,
        NodeKind::LessThan => ordering == Ordering::Less,
        NodeKind::LessThanOrEqual => ordering != Ordering::Greater,
        NodeKind::GreaterThan => ordering == Ordering::Greater,
        NodeKind::GreaterThanOrEqual => ordering != Ordering::Less,
        _ => false,
    })
}
