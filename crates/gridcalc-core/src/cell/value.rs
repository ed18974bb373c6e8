//! Cell value types

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The result of evaluating a formula or any fragment of one
///
/// Arithmetic is only defined between two numbers. Every other combination,
/// including anything touching [`Value::Invalid`], yields `Invalid`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Numeric value
    Number(f64),

    /// Literal text
    Text(String),

    /// Malformed formula, type mismatch, division by zero or a circular reference
    Invalid,
}

/// Horizontal placement of a value when it is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    Left,
    Right,
}

impl Value {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Value::Text(s.into())
    }

    /// Check if this is the error value
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    /// Get the value as a number, if it is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text is left-aligned, everything else right-aligned
    pub fn alignment(&self) -> HorizontalAlignment {
        match self {
            Value::Text(_) => HorizontalAlignment::Left,
            _ => HorizontalAlignment::Right,
        }
    }

    fn combine(&self, other: &Value, op: impl FnOnce(f64, f64) -> Value) -> Value {
        match (self, other) {
            (Value::Number(l), Value::Number(r)) => op(*l, *r),
            _ => Value::Invalid,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Invalid => write!(f, "####"),
        }
    }
}

impl Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        self.combine(rhs, |l, r| Value::Number(l + r))
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        self.combine(rhs, |l, r| Value::Number(l - r))
    }
}

impl Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        self.combine(rhs, |l, r| Value::Number(l * r))
    }
}

impl Div for &Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        self.combine(rhs, |l, r| {
            if r == 0.0 {
                Value::Invalid
            } else {
                Value::Number(l / r)
            }
        })
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::Number(n) => Value::Number(-n),
            _ => Value::Invalid,
        }
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl $trait for Value {
                type Output = Value;

                fn $method(self, rhs: Value) -> Value {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul, Div::div);

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        -&self
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_arithmetic() {
        let a = Value::Number(6.0);
        let b = Value::Number(4.0);
        assert_eq!(&a + &b, Value::Number(10.0));
        assert_eq!(&a - &b, Value::Number(2.0));
        assert_eq!(&a * &b, Value::Number(24.0));
        assert_eq!(&a / &b, Value::Number(1.5));
        assert_eq!(-&a, Value::Number(-6.0));
    }

    #[test]
    fn test_division_by_zero_is_invalid() {
        assert_eq!(Value::Number(5.0) / Value::Number(0.0), Value::Invalid);
        assert_eq!(Value::Number(0.0) / Value::Number(-0.0), Value::Invalid);
    }

    #[test]
    fn test_text_operands_are_invalid() {
        let text = Value::text("abc");
        assert_eq!(&text + &Value::Number(1.0), Value::Invalid);
        assert_eq!(&Value::Number(1.0) * &text, Value::Invalid);
        assert_eq!(-&text, Value::Invalid);
    }

    #[test]
    fn test_invalid_is_absorbing() {
        let one = Value::Number(1.0);
        assert_eq!(&Value::Invalid + &one, Value::Invalid);
        assert_eq!(&one - &Value::Invalid, Value::Invalid);
        assert_eq!(&Value::Invalid * &Value::Invalid, Value::Invalid);
        assert_eq!(-Value::Invalid, Value::Invalid);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Number(7.0).to_string(), "7");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-2.25).to_string(), "-2.25");
        assert_eq!(Value::text("hello").to_string(), "hello");
        assert_eq!(Value::Invalid.to_string(), "####");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(Value::text("x").alignment(), HorizontalAlignment::Left);
        assert_eq!(Value::Number(1.0).alignment(), HorizontalAlignment::Right);
        assert_eq!(Value::Invalid.alignment(), HorizontalAlignment::Right);
    }

    #[test]
    fn test_invalid_distinct_from_zero() {
        assert!(Value::Invalid.is_invalid());
        assert!(!Value::Number(0.0).is_invalid());
        assert!(!Value::text("").is_invalid());
        assert_eq!(Value::Invalid.as_number(), None);
    }
}
