//! Smithy model file parser

use super::types::{Shape, SmithyModel};
use smithy_zod_gen_common::{GeneratorError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Smithy model parser
///
/// Reads and parses Smithy JSON AST files such as the ones published in the
/// aws/api-models-aws repository.
pub struct SmithyParser {
    /// Loaded Smithy model
    model: SmithyModel,
}

impl SmithyParser {
    /// Load Smithy model from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SmithyParser::from_file("models/s3-2006-03-01.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read Smithy file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse Smithy model from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let model: SmithyModel = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse Smithy JSON: {}", e)))?;

        tracing::debug!(shapes = model.shapes.len(), "Loaded Smithy model");

        Ok(Self { model })
    }

    /// Drop every shape whose identifier starts with one of `prefixes`
    pub fn without_ignored_prefixes<S: AsRef<str>>(mut self, prefixes: &[S]) -> Self {
        let before = self.model.shapes.len();
        self.model
            .shapes
            .retain(|id, _| !prefixes.iter().any(|p| id.starts_with(p.as_ref())));

        let dropped = before - self.model.shapes.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped shapes with ignored prefixes");
        }
        self
    }

    /// Number of shapes per kind, with unsupported shapes counted as `other`
    pub fn shape_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for shape in self.model.shapes.values() {
            let kind = shape
                .kind()
                .map(|k| k.as_str().to_string())
                .unwrap_or_else(|| "other".to_string());
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    /// Identifiers of shapes that generation will skip
    pub fn unsupported_shapes(&self) -> Vec<&str> {
        self.model
            .shapes
            .iter()
            .filter(|(_, shape)| matches!(shape, Shape::Other))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Get reference to the underlying Smithy model
    pub fn model(&self) -> &SmithyModel {
        &self.model
    }

    /// Take ownership of the underlying Smithy model
    pub fn into_model(self) -> SmithyModel {
        self.model
    }
}
