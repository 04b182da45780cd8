//! Dynamic script values.
//!
//! Script values are untyped text in the source. The parser tags literal
//! nodes with a best guess (integer, serial, double, string), and every
//! consumer converts on demand through the `to_*` methods here.

mod compare;

use std::fmt;

use uos_ir::NodeKind;

use crate::errors::{cannot_convert, EvalResult};

pub use compare::{compare, loosely_equal, relational};

/// A runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    /// A numeric object handle, written `0x...` in scripts.
    Serial(u32),
    Double(f64),
    Str(String),
}

impl Value {
    /// Name of the variant, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Serial(_) => "serial",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
        }
    }

    /// Build a value from a literal node.
    ///
    /// Falls back to a string when the lexeme does not parse as its tag.
    pub fn from_literal(kind: NodeKind, lexeme: &str) -> Value {
        let parsed = match kind {
            NodeKind::Integer => lexeme.parse::<i32>().ok().map(Value::Int),
            NodeKind::Serial => parse_hex(lexeme).map(Value::Serial),
            NodeKind::Double => lexeme.parse::<f64>().ok().map(Value::Double),
            _ => None,
        };
        parsed.unwrap_or_else(|| Value::Str(lexeme.to_string()))
    }

    /// Parse text the way a bare numeric lexeme is read.
    ///
    /// `0x` prefix is a serial, an `i32` is an int, anything else numeric is
    /// a double.
    pub fn parse_number(text: &str) -> Option<Value> {
        let text = text.trim();
        if let Some(serial) = parse_hex(text) {
            return Some(Value::Serial(serial));
        }
        if let Ok(int) = text.parse::<i32>() {
            return Some(Value::Int(int));
        }
        let numeric = text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
        if numeric {
            if let Ok(double) = text.parse::<f64>() {
                if double.is_finite() {
                    return Some(Value::Double(double));
                }
            }
        }
        None
    }

    pub fn to_int(&self) -> EvalResult<i32> {
        match self {
            Value::Bool(b) => Ok(i32::from(*b)),
            Value::Int(i) => Ok(*i),
            Value::Serial(s) => i32::try_from(*s).map_err(|_| self.conversion("int")),
            Value::Double(d) => double_to_i64(*d)
                .and_then(|i| i32::try_from(i).ok())
                .ok_or_else(|| self.conversion("int")),
            Value::Str(s) => Self::parse_number(s)
                .ok_or_else(|| self.conversion("int"))?
                .to_int(),
        }
    }

    pub fn to_uint(&self) -> EvalResult<u32> {
        match self {
            Value::Bool(b) => Ok(u32::from(*b)),
            Value::Int(i) => u32::try_from(*i).map_err(|_| self.conversion("unsigned int")),
            Value::Serial(s) => Ok(*s),
            Value::Double(d) => double_to_i64(*d)
                .and_then(|i| u32::try_from(i).ok())
                .ok_or_else(|| self.conversion("unsigned int")),
            Value::Str(s) => Self::parse_number(s)
                .ok_or_else(|| self.conversion("unsigned int"))?
                .to_uint(),
        }
    }

    pub fn to_ushort(&self) -> EvalResult<u16> {
        let wide = self.to_uint()?;
        u16::try_from(wide).map_err(|_| self.conversion("short"))
    }

    /// Convert to an object handle. Negative numbers are rejected.
    pub fn to_serial(&self) -> EvalResult<u32> {
        match self {
            Value::Serial(s) => Ok(*s),
            Value::Str(s) => Self::parse_number(s)
                .ok_or_else(|| self.conversion("serial"))?
                .to_serial(),
            _ => self.to_uint().map_err(|_| self.conversion("serial")),
        }
    }

    pub fn to_double(&self) -> EvalResult<f64> {
        match self {
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Int(i) => Ok(f64::from(*i)),
            Value::Serial(s) => Ok(f64::from(*s)),
            Value::Double(d) => Ok(*d),
            Value::Str(s) => Self::parse_number(s)
                .ok_or_else(|| self.conversion("double"))?
                .to_double(),
        }
    }

    /// Numbers are true when nonzero; text must read `true`, `false` or a number.
    pub fn to_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            Value::Serial(s) => Ok(*s != 0),
            Value::Double(d) => Ok(*d != 0.0),
            Value::Str(s) => {
                if let Some(b) = parse_bool(s) {
                    return Ok(b);
                }
                Self::parse_number(s)
                    .ok_or_else(|| self.conversion("bool"))?
                    .to_bool()
            }
        }
    }

    fn conversion(&self, target: &'static str) -> crate::EvalError {
        cannot_convert(&self.to_string(), target)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Serial(s) => write!(f, "0x{s:X}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

pub(crate) fn parse_hex(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    u32::from_str_radix(digits, 16).ok()
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is truncated toward zero and range-checked first"
)]
fn double_to_i64(d: f64) -> Option<i64> {
    let t = d.trunc();
    (t.is_finite() && t >= -9.0e15 && t <= 9.0e15).then_some(t as i64)
}

#[cfg(test)]
mod tests;
