//! Smithy model loading for smithy-zod-gen
//!
//! This crate turns a Smithy JSON AST document into the shape graph the
//! generator walks: an ordered map from shape identifier to a shape tagged
//! with its kind, typed trait bags, and helpers for shape identifiers.

pub mod smithy;

pub use smithy::{ShapeId, ShapeKind, Shape, SmithyModel, SmithyParser, Traits};
