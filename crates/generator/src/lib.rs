//! zod schema and TypeScript surface generation for Smithy models
//!
//! This crate turns a parsed [`SmithyModel`] into generated TypeScript files:
//! zod validators for every schema-bearing shape, enum declarations, error
//! classes and service interfaces.
//!
//! Generation runs in two passes. A discovery pass registers a symbol for
//! every schema-bearing shape; then the per-kind generators run in a fixed
//! order, resolving references through the symbol table so that forward and
//! cyclic references work.

pub mod context;
pub mod expr;
pub mod files;
pub mod generators;
pub mod markers;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod schema;
mod templates;
pub mod validate;
pub mod writer;

pub use context::CodeGenContext;
pub use files::{FileGroup, FileKey, SubFile};
pub use validate::Validation;
pub use writer::{FsSink, OutputLayout, OutputSink};

use schema::Schema;
use smithy_zod_gen_common::{CodegenConfig, GeneratorError, Result};
use smithy_zod_gen_parser::SmithyModel;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tera::Tera;
use validate::Evaluator;

/// Schema generator
///
/// Transforms a Smithy model into the files of the primary namespace and of
/// every other namespace it references:
/// - `service.ts` (service interfaces)
/// - `enums.ts` (enum declarations and validators)
/// - `structures.ts` (object validators)
/// - `errors.ts` (error validators and classes)
pub struct SchemaGenerator {
    model: SmithyModel,
    config: CodegenConfig,
    tera: Tera,
}

impl SchemaGenerator {
    /// Create a new schema generator
    pub fn new(model: SmithyModel, config: CodegenConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            model,
            config,
            tera,
        })
    }

    pub fn model(&self) -> &SmithyModel {
        &self.model
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Run generation and render every file
    ///
    /// Any fatal condition aborts the run; no partial output is returned.
    pub fn generate(&self) -> Result<GeneratedModel> {
        let mut ctx = CodeGenContext::new(&self.model, &self.config);
        ctx.generate()?;

        let files = ctx.render_files(&self.tera)?;
        let schemas = ctx.into_schemas();

        Ok(GeneratedModel { files, schemas })
    }
}

/// Generate with the default configuration (convenience function)
pub fn generate_schemas(model: SmithyModel) -> Result<GeneratedModel> {
    SchemaGenerator::new(model, CodegenConfig::default())?.generate()
}

/// Output of one generation run
#[derive(Debug, Clone)]
pub struct GeneratedModel {
    files: BTreeMap<FileKey, String>,
    schemas: BTreeMap<String, Schema>,
}

impl GeneratedModel {
    /// Rendered files, ordered by file key
    pub fn files(&self) -> &BTreeMap<FileKey, String> {
        &self.files
    }

    pub fn file(&self, file_key: &FileKey) -> Option<&str> {
        self.files.get(file_key).map(String::as_str)
    }

    /// Schema generated for a shape
    pub fn schema(&self, shape_id: &str) -> Option<&Schema> {
        self.schemas.get(shape_id)
    }

    /// Write every file through `sink`, returning the written paths
    pub fn write(&self, layout: &OutputLayout, sink: &mut dyn OutputSink) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for (file_key, contents) in &self.files {
            let path = layout.path_for(file_key)?;
            sink.write(&path, contents)?;
            tracing::debug!(file = %file_key, path = %path.display(), "Wrote file");
            written.push(path);
        }
        Ok(written)
    }

    /// Validate a JSON value against the schema generated for `shape_id`
    pub fn validate(&self, shape_id: &str, value: &serde_json::Value) -> Result<Validation> {
        let schema = self.schemas.get(shape_id).ok_or_else(|| {
            GeneratorError::Generation(format!("No schema was generated for {}", shape_id))
        })?;
        Ok(Evaluator::new(&self.schemas).validate(schema, value))
    }
}
