//! Common types and utilities for smithy-zod-gen
//!
//! This crate contains the error taxonomy and the codegen configuration
//! shared by the parser, generator, and CLI components.

mod config;

pub use config::{CodegenConfig, ImportModules, OutputConfig};

use thiserror::Error;

/// Errors that can occur while loading a model or generating schemas
///
/// Apart from the I/O and serialization wrappers, every variant aborts the
/// run. Partial output must not be used after an error.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Invalid shape identifier (missing '#'): {id}")]
    MalformedIdentifier { id: String },

    #[error("Map {map} has an unresolved key target {key}")]
    UnresolvedMapKey { map: String, key: String },

    #[error("Map {map} key target {key} is not string-compatible (resolved to {kind})")]
    MapKeyNotString {
        map: String,
        key: String,
        kind: String,
    },

    #[error("Unsupported smithy.api#default value on {location}: {reason}")]
    UnsupportedDefault { location: String, reason: String },

    #[error("Unsupported smithy.api#default target type \"{kind}\" on {location}")]
    UnsupportedDefaultTarget { location: String, kind: String },

    #[error("Cannot apply smithy.api#default on {location}: missing target shape type")]
    MissingDefaultTarget { location: String },

    #[error("No output path configured for file key: {file_key}")]
    MissingOutputPath { file_key: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
