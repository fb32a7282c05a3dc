//! Validation issues and constraint checks
//!
//! Each check returns `None` when the constraint holds and a single [`Issue`]
//! otherwise. Bounds are inclusive.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// One step in the path from the validated root to an offending value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Issue classification, mirroring the issue codes of the schema library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    InvalidFormat,
    InvalidValue,
    TooSmall,
    TooBig,
    Custom,
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            code,
            message: message.into(),
        }
    }

    /// Set the path relative to the value the check ran on
    pub fn at(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }

    /// Prefix the path with the segment leading to the checked value
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Path rendered as `a.b.0`; empty for the root
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

/// Lower bound on a string's character count or an array's length
pub fn check_min_length(length: usize, min: u64) -> Option<Issue> {
    ((length as u64) < min).then(|| {
        Issue::new(
            IssueCode::TooSmall,
            format!("Too small: expected length >= {}", min),
        )
    })
}

/// Upper bound on a string's character count or an array's length
pub fn check_max_length(length: usize, max: u64) -> Option<Issue> {
    ((length as u64) > max).then(|| {
        Issue::new(
            IssueCode::TooBig,
            format!("Too big: expected length <= {}", max),
        )
    })
}

pub fn check_min_value(value: f64, min: f64) -> Option<Issue> {
    (value < min).then(|| {
        Issue::new(
            IssueCode::TooSmall,
            format!("Too small: expected number >= {}", min),
        )
    })
}

pub fn check_max_value(value: f64, max: f64) -> Option<Issue> {
    (value > max).then(|| {
        Issue::new(
            IssueCode::TooBig,
            format!("Too big: expected number <= {}", max),
        )
    })
}

/// Reject the first element whose serialization equals an earlier element's
///
/// The issue is reported at the index of the second occurrence. Objects
/// serialize in insertion order, as `JSON.stringify` does, so objects that
/// differ only in key order are distinct items.
pub fn check_unique_items(items: &[Value]) -> Option<Issue> {
    let mut seen = HashSet::new();
    items.iter().enumerate().find_map(|(index, item)| {
        (!seen.insert(item.to_string())).then(|| {
            Issue::new(IssueCode::Custom, "Duplicate items are not allowed.")
                .at(PathSegment::Index(index))
        })
    })
}
