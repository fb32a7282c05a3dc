//! Name/symbol resolution
//!
//! Maps shape identifiers to output files and generated symbol names. The
//! table is filled by a discovery pass before any generator runs, so a
//! generator can reference shapes that are emitted later.

use crate::files::{FileKey, SubFile};
use crate::naming;
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{Shape, ShapeId, ShapeKind, SmithyModel};
use std::collections::HashMap;

/// Generated symbol of a schema-bearing shape
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// `{lowerCamel}Schema`
    pub schema_name: String,
    /// `{UpperCamel}`, or `{UpperCamel}Error` for error structures
    pub type_name: String,
    pub file_key: FileKey,
    pub kind: ShapeKind,
}

impl Symbol {
    /// Whether the shape gets its own binding instead of being inlined
    pub fn is_standalone(&self) -> bool {
        matches!(self.kind, ShapeKind::Enum | ShapeKind::Structure)
    }
}

/// Symbol table for one generation run
#[derive(Debug)]
pub struct SymbolTable {
    primary_namespace: String,
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new(primary_namespace: impl Into<String>) -> Self {
        Self {
            primary_namespace: primary_namespace.into(),
            symbols: HashMap::new(),
        }
    }

    /// Output file of a shape, from its namespace and kind
    pub fn output_file_key(&self, model: &SmithyModel, shape_id: &str) -> Result<FileKey> {
        let id = ShapeId::parse(shape_id)?;
        let shape = model.get_shape(shape_id);

        let sub = match shape.and_then(Shape::kind) {
            Some(ShapeKind::Service) => SubFile::Service,
            Some(ShapeKind::Enum) => SubFile::Enums,
            Some(ShapeKind::Structure) if shape.is_some_and(Shape::is_error_structure) => {
                SubFile::Errors
            }
            Some(ShapeKind::Structure) => SubFile::Structures,
            _ => SubFile::Schema,
        };

        if id.namespace == self.primary_namespace {
            Ok(FileKey::primary(sub))
        } else {
            Ok(FileKey::shared(id.namespace, sub))
        }
    }

    /// Register a schema-bearing shape; later calls return the first symbol
    pub fn register(&mut self, model: &SmithyModel, shape_id: &str) -> Result<Option<&Symbol>> {
        if !self.symbols.contains_key(shape_id) {
            let Some(shape) = model.get_shape(shape_id) else {
                return Ok(None);
            };
            let Some(kind) = shape.kind().filter(ShapeKind::is_schema_bearing) else {
                return Ok(None);
            };

            let id = ShapeId::parse(shape_id)?;
            let type_name = if shape.is_error_structure() {
                naming::error_class_name(id.name)
            } else {
                naming::type_name(id.name)
            };
            let symbol = Symbol {
                schema_name: naming::schema_name(id.name),
                type_name,
                file_key: self.output_file_key(model, shape_id)?,
                kind,
            };

            tracing::trace!(shape = shape_id, file = %symbol.file_key, "Registered shape");
            self.symbols.insert(shape_id.to_string(), symbol);
        }
        Ok(self.symbols.get(shape_id))
    }

    /// Register every schema-bearing shape of the model
    pub fn discover(&mut self, model: &SmithyModel) -> Result<usize> {
        for shape_id in model.shapes.keys() {
            self.register(model, shape_id)?;
        }
        Ok(self.symbols.len())
    }

    pub fn is_registered(&self, shape_id: &str) -> bool {
        self.symbols.contains_key(shape_id)
    }

    pub fn lookup(&self, shape_id: &str) -> Option<&Symbol> {
        self.symbols.get(shape_id)
    }

    /// Names reserved for the standalone declarations of `file_key`, sorted
    pub fn declared_in(&self, file_key: &FileKey) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .symbols
            .values()
            .filter(|symbol| symbol.is_standalone() && &symbol.file_key == file_key)
            .flat_map(|symbol| [symbol.schema_name.as_str(), symbol.type_name.as_str()])
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
