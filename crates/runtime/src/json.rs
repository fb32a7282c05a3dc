//! Precision-preserving JSON helpers
//!
//! `long` shapes carry 64-bit integers, which exceed the safe-integer range
//! of IEEE doubles (±(2^53 − 1)). Integer literals are kept as exact 64-bit
//! values on parse and written back as bare numeric literals, never as
//! strings or rounded floats. Non-integer numbers stay floating point.

use crate::Result;
use serde_json::{Number, Value};
use std::fmt;

/// Largest integer a double represents exactly
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Smallest integer a double represents exactly
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// A 64-bit integer taken from a JSON number without precision loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WideInt {
    Signed(i64),
    Unsigned(u64),
}

impl WideInt {
    /// Extract an integer from a JSON number; floats yield `None`
    pub fn from_number(number: &Number) -> Option<Self> {
        if let Some(value) = number.as_i64() {
            Some(WideInt::Signed(value))
        } else {
            number.as_u64().map(WideInt::Unsigned)
        }
    }

    /// Extract an integer from a JSON value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Self::from_number(number),
            _ => None,
        }
    }

    /// Whether a double could hold this value exactly
    pub fn is_safe(&self) -> bool {
        match *self {
            WideInt::Signed(value) => (MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value),
            WideInt::Unsigned(value) => value <= MAX_SAFE_INTEGER as u64,
        }
    }

    /// Convert back into a JSON value
    pub fn to_value(&self) -> Value {
        match *self {
            WideInt::Signed(value) => Value::Number(Number::from(value)),
            WideInt::Unsigned(value) => Value::Number(Number::from(value)),
        }
    }
}

impl fmt::Display for WideInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WideInt::Signed(value) => write!(f, "{}", value),
            WideInt::Unsigned(value) => write!(f, "{}", value),
        }
    }
}

/// Parse JSON text, keeping every 64-bit integer literal exact
pub fn parse_wide(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a value, writing wide integers as bare numeric literals
pub fn to_string_wide(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Collect the integers in `value` that fall outside the safe-integer range
///
/// These are the values a double-based JSON reader would corrupt.
pub fn wide_integers(value: &Value) -> Vec<WideInt> {
    let mut found = Vec::new();
    collect_wide(value, &mut found);
    found
}

fn collect_wide(value: &Value, found: &mut Vec<WideInt>) {
    match value {
        Value::Number(number) => {
            if let Some(int) = WideInt::from_number(number) {
                if !int.is_safe() {
                    found.push(int);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_wide(item, found)),
        Value::Object(map) => map.values().for_each(|item| collect_wide(item, found)),
        _ => {}
    }
}
