//! Typed Smithy trait bags
//!
//! Recognized traits are deserialized into typed fields. Every other trait
//! lands in `extra` so it can still be reported instead of dropped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Common Smithy trait names
pub mod names {
    pub const DOCUMENTATION: &str = "smithy.api#documentation";
    pub const RANGE: &str = "smithy.api#range";
    pub const LENGTH: &str = "smithy.api#length";
    pub const PATTERN: &str = "smithy.api#pattern";
    pub const REQUIRED: &str = "smithy.api#required";
    pub const DEFAULT: &str = "smithy.api#default";
    pub const UNIQUE_ITEMS: &str = "smithy.api#uniqueItems";
    pub const TIMESTAMP_FORMAT: &str = "smithy.api#timestampFormat";
    pub const ENUM_VALUE: &str = "smithy.api#enumValue";
    pub const ERROR: &str = "smithy.api#error";
    pub const HTTP_ERROR: &str = "smithy.api#httpError";
    pub const STREAMING: &str = "smithy.api#streaming";
}

/// Inclusive lower/upper bounds of a `range` or `length` trait
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
}

/// Value of the `timestampFormat` trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    DateTime,
    HttpDate,
    EpochSeconds,
}

/// Value of the `error` trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Client,
    Server,
}

/// Traits attached to a shape or a member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    #[serde(rename = "smithy.api#documentation", default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(rename = "smithy.api#range", default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Bounds<f64>>,

    #[serde(rename = "smithy.api#length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Bounds<u64>>,

    #[serde(rename = "smithy.api#pattern", default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Marker trait, payload is `{}`
    #[serde(rename = "smithy.api#required", default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Value>,

    #[serde(rename = "smithy.api#default", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Marker trait, payload is `{}`
    #[serde(rename = "smithy.api#uniqueItems", default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<Value>,

    #[serde(rename = "smithy.api#timestampFormat", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_format: Option<TimestampFormat>,

    #[serde(rename = "smithy.api#enumValue", default, skip_serializing_if = "Option::is_none")]
    pub enum_value: Option<Value>,

    #[serde(rename = "smithy.api#error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,

    #[serde(rename = "smithy.api#httpError", default, skip_serializing_if = "Option::is_none")]
    pub http_error: Option<u16>,

    /// Marker trait, payload is `{}`
    #[serde(rename = "smithy.api#streaming", default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<Value>,

    /// Every trait without a typed field above
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Traits {
    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn has_unique_items(&self) -> bool {
        self.unique_items.is_some()
    }

    /// String form of `enumValue`, if it is a string
    pub fn enum_value_str(&self) -> Option<&str> {
        self.enum_value.as_ref().and_then(Value::as_str)
    }

    /// All present traits outside `mapped`, sorted by trait key
    pub fn unmapped(&self, mapped: &[&str]) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .filter(|(key, _)| !mapped.contains(&key.as_str()))
                .collect(),
            _ => Vec::new(),
        };
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
