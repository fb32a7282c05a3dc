//! Shared runtime helpers for smithy-zod-gen output
//!
//! Generated schema files import two canonical timestamp validators, a pair
//! of precision-preserving JSON helpers and a tagged error base type from a
//! shared runtime package. This crate carries the same behavior for Rust
//! callers, and the generator's schema evaluator is built on it.
//!
//! - [`timestamp`]: `date-time` normalization and `http-date` validation
//! - [`json`]: 64-bit integer preserving JSON parse/stringify
//! - [`issue`]: validation issues and the constraint checks that produce them

pub mod issue;
pub mod json;
pub mod timestamp;

pub use issue::{Issue, IssueCode, PathSegment};
pub use json::WideInt;

use thiserror::Error;

/// Errors raised by the runtime helpers
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Invalid RFC3339 date-time timestamp: {0}")]
    InvalidDateTime(String),

    #[error("Invalid IMF-fixdate timestamp: {0}")]
    InvalidHttpDate(String),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for runtime helpers
pub type Result<T> = std::result::Result<T, RuntimeError>;
