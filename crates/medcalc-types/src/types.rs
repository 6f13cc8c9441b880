use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value in a formula parameter bag.
///
/// Deserialises from plain JSON scalars, so `{"weight_kg": 70, "height_m": "1.75"}`
/// becomes an `Integer` and a `String` entry respectively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean flag. Never coerced to a number.
    Boolean(bool),
    /// A whole number.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Free text, coercible to a number when it parses as one.
    String(String),
    /// An explicit absence of a value.
    Null,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Boolean(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Float(fl) => write!(f, "{fl}"),
            ParamValue::String(s) => write!(f, "\"{s}\""),
            ParamValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl ParamValue {
    /// Returns the numeric value for `Integer` and `Float` variants only.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Coerces the value to `f64`.
    ///
    /// Numbers convert directly and strings are parsed after trimming
    /// surrounding whitespace. Booleans and `Null` never coerce.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(_) | ParamValue::Float(_) => self.as_number(),
            ParamValue::String(s) => s.trim().parse::<f64>().ok(),
            ParamValue::Boolean(_) | ParamValue::Null => None,
        }
    }

    /// Returns the inner string for the `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Boolean(_) => "boolean",
            ParamValue::Integer(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::Null => "null",
        }
    }
}
