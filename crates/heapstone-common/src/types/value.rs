//! Field types and runtime field values.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{INT_FIELD_SIZE, TEXT_FIELD_SIZE};
use crate::error::HeapstoneError;

/// The closed set of field types a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 32-bit signed integer.
    Int,
    /// Bounded-length string.
    Text,
}

impl FieldType {
    /// Number of bytes one field of this type occupies on a page.
    #[inline]
    #[must_use]
    pub const fn encoded_size(self) -> usize {
        match self {
            Self::Int => INT_FIELD_SIZE,
            Self::Text => TEXT_FIELD_SIZE,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl FromStr for FieldType {
    type Err = HeapstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "text" | "string" => Ok(Self::Text),
            other => Err(HeapstoneError::invalid_argument(format!(
                "unknown field type: {other}"
            ))),
        }
    }
}

/// A runtime field value.
///
/// Equality and hashing are structural, so values can be used directly as
/// group keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Integer value.
    Int(i32),
    /// String value.
    Text(String),
}

impl Value {
    /// Creates an integer value.
    pub fn int(v: i32) -> Self {
        Value::Int(v)
    }

    /// Creates a text value.
    pub fn text(v: impl Into<String>) -> Self {
        Value::Text(v.into())
    }

    /// Returns the type of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Int(_) => FieldType::Int,
            Value::Text(_) => FieldType::Text,
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    /// Returns the string payload, if this is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    /// Parses a value of the given type from its text form.
    pub fn parse(field_type: FieldType, s: &str) -> Result<Self, HeapstoneError> {
        match field_type {
            FieldType::Int => s.trim().parse::<i32>().map(Value::Int).map_err(|e| {
                HeapstoneError::invalid_argument(format!("cannot parse {s:?} as int: {e}"))
            }),
            FieldType::Text => Ok(Value::Text(s.to_string())),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            // Integers sort before strings
            (Value::Int(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Int(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}
