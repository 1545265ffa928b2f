//! Value types for faultline
//!
//! This module defines:
//! - Value: Dynamic value enum held by fixture records
//!
//! ## Value Model
//!
//! The Value enum has 7 variants: Null, Bool, Int, Float, String, Array, Object.
//!
//! ### Type Rules
//!
//! - No implicit coercion into numbers: `Int(1) + String("1")` is a type mismatch
//! - `Int(1) != Float(1.0)` - different types are NEVER equal
//! - Int and Float mix freely in arithmetic and ordering (result widens to Float)
//! - Text compared against a number is ordered lexicographically against the
//!   number's rendering, so `String("5") > Int(0)` but `String("-1") < Int(0)`
//!   and `String("00") > Int(0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use crate::error::{Error, Result};
use crate::record::Record;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Dynamic value held in a [`Record`] field
///
/// Serializes as natural JSON (`1`, `"text"`, `[..]`, `{..}`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object with ordered string keys
    Object(Record),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Different types are NEVER equal
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is any numeric value (Int widens)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &Record if this is an Object value
    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    fn mismatch(&self, op: &'static str, other: &Value) -> Error {
        Error::TypeMismatch {
            op,
            left: self.type_name(),
            right: other.type_name(),
        }
    }

    /// Dynamic addition.
    ///
    /// Numbers add (Int + Int stays Int unless it overflows), strings
    /// concatenate. Every other pairing is a [`Error::TypeMismatch`].
    pub fn add(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a
                .checked_add(*b)
                .map(Value::Int)
                .unwrap_or(Value::Float(*a as f64 + *b as f64))),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => Ok(Value::Float(a + b)),
                _ => Err(self.mismatch("+", other)),
            },
        }
    }

    /// Dynamic multiplication. Numbers only.
    pub fn mul(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(a
                .checked_mul(*b)
                .map(Value::Int)
                .unwrap_or(Value::Float(*a as f64 * *b as f64))),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => Ok(Value::Float(a * b)),
                _ => Err(self.mismatch("*", other)),
            },
        }
    }

    /// Dynamic ordering.
    ///
    /// Numbers compare numerically, strings lexicographically, and a string
    /// against a number compares lexicographically against the number's
    /// rendering. Bools order `false < true`. Anything else (including NaN)
    /// is a [`Error::TypeMismatch`].
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        let ordering = match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::Int(_) | Value::Float(_)) => {
                Some(a.as_str().cmp(other.to_string().as_str()))
            }
            (Value::Int(_) | Value::Float(_), Value::String(b)) => {
                Some(self.to_string().as_str().cmp(b.as_str()))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        };
        ordering.ok_or_else(|| self.mismatch("<", other))
    }

    /// Whether `self > other` under [`Value::compare`]
    pub fn gt(&self, other: &Value) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" on whole floats
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(a) => {
                f.write_str("[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Value::Object(o) => write!(f, "{}", o),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<Record> for Value {
    fn from(o: Record) -> Self {
        Value::Object(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// serde_json interop for loading sample data from JSON text
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64 range falls back to f64
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
