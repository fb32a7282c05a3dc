//! Emission context
//!
//! One [`CodeGenContext`] exists per generation run. It owns the symbol
//! table, the fragments accumulated per output file, the operation
//! signatures consumed by the service generator, and the schema of every
//! generated shape. Nothing outlives the run except the rendered files.

use crate::expr::{Expr, Renderer};
use crate::files::FileKey;
use crate::generators::{self, OperationSignature};
use crate::registry::{Symbol, SymbolTable};
use crate::resolver::Resolver;
use crate::schema::{Modules, Schema};
use crate::templates;
use smithy_zod_gen_common::{CodegenConfig, GeneratorError, Result};
use smithy_zod_gen_parser::smithy::{Shape, SmithyModel};
use std::collections::{BTreeMap, HashMap};
use tera::Tera;

/// Per-run generation state
pub struct CodeGenContext<'a> {
    model: &'a SmithyModel,
    config: &'a CodegenConfig,
    symbols: SymbolTable,
    files: BTreeMap<FileKey, Vec<Expr>>,
    operations: HashMap<String, OperationSignature>,
    schemas: BTreeMap<String, Schema>,
}

impl<'a> CodeGenContext<'a> {
    pub fn new(model: &'a SmithyModel, config: &'a CodegenConfig) -> Self {
        Self {
            model,
            config,
            symbols: SymbolTable::new(config.primary_namespace.clone()),
            files: BTreeMap::new(),
            operations: HashMap::new(),
            schemas: BTreeMap::new(),
        }
    }

    pub fn model(&self) -> &'a SmithyModel {
        self.model
    }

    pub fn config(&self) -> &'a CodegenConfig {
        self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Reference resolver over the current symbol table
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.model, &self.symbols, self.config)
    }

    /// Import modules used when lowering schemas
    pub fn modules(&self) -> Modules<'a> {
        let config = self.config;
        Modules {
            zod: &config.imports.zod,
            runtime: &config.imports.runtime,
            shared_prefix: config.output.shared_import_prefix.as_deref(),
        }
    }

    pub fn output_file_key(&self, shape_id: &str) -> Result<FileKey> {
        self.symbols.output_file_key(self.model, shape_id)
    }

    /// Registered symbol of a shape that must have been discovered
    pub fn symbol(&self, shape_id: &str) -> Result<&Symbol> {
        self.symbols.lookup(shape_id).ok_or_else(|| {
            GeneratorError::Generation(format!("Shape {} was not registered", shape_id))
        })
    }

    /// Append a fragment to a file
    pub fn add_code(&mut self, file_key: FileKey, fragment: Expr) {
        tracing::debug!(file = %file_key, "Adding fragment");
        self.files.entry(file_key).or_default().push(fragment);
    }

    /// Record the validator generated for a shape
    pub fn add_schema(&mut self, shape_id: &str, schema: Schema) {
        self.schemas.insert(shape_id.to_string(), schema);
    }

    pub fn register_operation(&mut self, shape_id: &str, signature: OperationSignature) {
        self.operations.insert(shape_id.to_string(), signature);
    }

    pub fn operation(&self, shape_id: &str) -> Option<&OperationSignature> {
        self.operations.get(shape_id)
    }

    /// Register every schema-bearing shape ahead of generation
    pub fn discover(&mut self) -> Result<usize> {
        self.symbols.discover(self.model)
    }

    /// Discovery pass followed by every generator in dependency order
    pub fn generate(&mut self) -> Result<()> {
        let discovered = self.discover()?;
        tracing::info!(shapes = self.model.shapes.len(), discovered, "Discovered shapes");

        for (shape_id, shape) in &self.model.shapes {
            if matches!(shape, Shape::Other) {
                tracing::warn!(shape = %shape_id, "Skipping unsupported shape type");
            }
        }

        generators::generate_all(self)?;

        tracing::info!(files = self.files.len(), "Generated files");
        Ok(())
    }

    /// Render every file through the file template
    pub fn render_files(&self, tera: &Tera) -> Result<BTreeMap<FileKey, String>> {
        let mut rendered = BTreeMap::new();
        for (file_key, fragments) in &self.files {
            let mut renderer = Renderer::with_locals(self.symbols.declared_in(file_key));
            let body: Vec<String> = fragments.iter().map(|f| renderer.render(f)).collect();
            let contents = templates::render_file(
                tera,
                &self.config.header,
                &renderer.import_block(),
                &body.join("\n\n"),
            )?;
            rendered.insert(file_key.clone(), contents);
        }
        Ok(rendered)
    }

    /// Schemas of every generated shape, keyed by shape identifier
    pub fn into_schemas(self) -> BTreeMap<String, Schema> {
        self.schemas
    }

    pub fn file_keys(&self) -> impl Iterator<Item = &FileKey> {
        self.files.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::SubFile;
    use smithy_zod_gen_parser::smithy::SmithyParser;

    fn model() -> SmithyModel {
        SmithyParser::from_json(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#Bucket": {
                        "type": "structure",
                        "members": { "Name": { "target": "smithy.api#String" } }
                    },
                    "com.amazonaws.s3#Thing": { "type": "resource" }
                }
            }"#,
        )
        .unwrap()
        .into_model()
    }

    #[test]
    fn test_fragments_accumulate_per_file() {
        let model = model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);

        let key = FileKey::primary(SubFile::Schema);
        ctx.add_code(key.clone(), Expr::raw("const a = 1;"));
        ctx.add_code(key.clone(), Expr::raw("const b = 2;"));

        let tera = templates::load_templates().unwrap();
        let files = ctx.render_files(&tera).unwrap();
        let contents = &files[&key];
        assert!(contents.starts_with(&config.header));
        assert!(contents.contains("const a = 1;\n\nconst b = 2;"));
    }

    #[test]
    fn test_generate_skips_unsupported_shapes() {
        let model = model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);

        ctx.generate().unwrap();
        assert_eq!(ctx.symbols().len(), 1);
        assert!(ctx.symbol("com.amazonaws.s3#Thing").is_err());
        let keys: Vec<&FileKey> = ctx.file_keys().collect();
        assert_eq!(keys, vec![&FileKey::primary(SubFile::Structures)]);
    }
}
