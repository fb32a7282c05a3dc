//! Reference resolution
//!
//! Turns a target shape identifier into the validator used at a reference
//! site. Enums and structures have standalone bindings and resolve to a
//! reference (bare, imported, or lazy). Every other schema-bearing kind is
//! expanded inline with its constraint chain. Inline expansion keeps a
//! visitation stack, so a shape that reaches itself through other inline
//! shapes resolves to a placeholder instead of recursing forever.

use crate::files::FileKey;
use crate::markers;
use crate::registry::SymbolTable;
use crate::schema::{Schema, SchemaRef};
use smithy_zod_gen_common::{CodegenConfig, GeneratorError, Result};
use smithy_zod_gen_parser::smithy::{
    prelude, trait_names, Member, Shape, ShapeId, ShapeKind, SmithyModel, Traits,
};

/// Per-call resolution options
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions<'a> {
    /// Shape being generated; a reference to it resolves to a placeholder
    pub current_shape: Option<&'a str>,
    /// Wrap same-file references to standalone bindings in `z.lazy`
    pub lazy_for_same_file: bool,
}

impl<'a> ResolveOptions<'a> {
    pub fn lazy() -> Self {
        Self {
            current_shape: None,
            lazy_for_same_file: true,
        }
    }
}

/// Outcome of resolving one target
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub schema: Schema,
    /// `false` when `schema` is the accept-anything placeholder
    pub resolved: bool,
    /// Kind of the target, when known
    pub kind: Option<ShapeKind>,
    /// Placeholder produced by a self or cyclic reference
    pub recursive: bool,
}

impl Resolution {
    fn resolved(schema: Schema, kind: Option<ShapeKind>) -> Self {
        Self {
            schema,
            resolved: true,
            kind,
            recursive: false,
        }
    }

    fn placeholder(recursive: bool) -> Self {
        Self {
            schema: Schema::Unknown,
            resolved: false,
            kind: None,
            recursive,
        }
    }
}

/// Resolves targets against the symbol table of one run
pub struct Resolver<'a> {
    model: &'a SmithyModel,
    symbols: &'a SymbolTable,
    config: &'a CodegenConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(model: &'a SmithyModel, symbols: &'a SymbolTable, config: &'a CodegenConfig) -> Self {
        Self {
            model,
            symbols,
            config,
        }
    }

    /// Resolve `target` for use in the file `from`
    pub fn resolve(&self, target: &str, from: &FileKey, options: ResolveOptions<'_>) -> Result<Resolution> {
        let mut stack = Vec::new();
        self.resolve_in(target, from, options, &mut stack)
    }

    /// Resolve with an explicit visitation stack of inline shapes
    pub fn resolve_in(
        &self,
        target: &str,
        from: &FileKey,
        options: ResolveOptions<'_>,
        stack: &mut Vec<String>,
    ) -> Result<Resolution> {
        if options.current_shape == Some(target) || stack.iter().any(|id| id == target) {
            return Ok(Resolution::placeholder(true));
        }

        if let Some(builtin) = Self::builtin(target) {
            return Ok(builtin);
        }

        ShapeId::parse(target)?;
        let Some(symbol) = self.symbols.lookup(target) else {
            return Ok(Resolution::placeholder(false));
        };

        if symbol.is_standalone() {
            let reference = Schema::Ref(SchemaRef {
                shape_id: target.to_string(),
                name: symbol.schema_name.clone(),
                file_key: symbol.file_key.clone(),
                kind: symbol.kind,
            });
            let schema = if options.lazy_for_same_file && &symbol.file_key == from {
                Schema::Lazy(Box::new(reference))
            } else {
                reference
            };
            return Ok(Resolution::resolved(schema, Some(symbol.kind)));
        }

        stack.push(target.to_string());
        let expanded = self.expand(target, from, stack);
        stack.pop();

        Ok(Resolution::resolved(expanded?, Some(symbol.kind)))
    }

    /// Fixed validators of prelude shapes
    pub fn builtin(target: &str) -> Option<Resolution> {
        let (schema, kind) = match target {
            prelude::STRING => (Schema::string(), Some(ShapeKind::String)),
            prelude::BOOLEAN => (Schema::Boolean, Some(ShapeKind::Boolean)),
            prelude::INTEGER => (Schema::integer(), Some(ShapeKind::Integer)),
            prelude::LONG => (Schema::BigInt, Some(ShapeKind::Long)),
            prelude::BLOB => (Schema::Bytes, Some(ShapeKind::Blob)),
            prelude::TIMESTAMP => (Schema::DateTime, Some(ShapeKind::Timestamp)),
            prelude::DOCUMENT => (Schema::Unknown, Some(ShapeKind::Document)),
            prelude::UNIT => (Schema::Unknown, None),
            _ => return None,
        };
        Some(Resolution::resolved(schema, kind))
    }

    /// Inline validator of a list, map, union, or scalar shape
    ///
    /// Nested references are resolved against `from` with lazy same-file
    /// references. `stack` must already contain `shape_id`. Traits the
    /// validator does not express are kept as comment markers around it.
    pub fn expand(&self, shape_id: &str, from: &FileKey, stack: &mut Vec<String>) -> Result<Schema> {
        let Some(shape) = self.model.get_shape(shape_id) else {
            return Ok(Schema::Unknown);
        };
        let name = ShapeId::parse(shape_id)?.name;

        let schema = match shape {
            Shape::Blob { .. } => Schema::Bytes,
            Shape::Boolean { .. } => Schema::Boolean,
            Shape::Document { .. } => Schema::Unknown,
            Shape::Long { .. } => Schema::BigInt,
            Shape::Integer { traits } => Schema::Number {
                integer: true,
                min: traits.range.and_then(|r| r.min),
                max: traits.range.and_then(|r| r.max),
            },
            Shape::String { traits } => Schema::String {
                min_length: traits.length.and_then(|l| l.min),
                max_length: traits.length.and_then(|l| l.max),
                pattern: traits.pattern.clone(),
            },
            Shape::Timestamp { traits } => self.timestamp_schema(shape_id, traits)?,
            Shape::List { member, traits } => {
                let item = self.nested(member, "list member", name, from, stack)?;
                Schema::Array {
                    item: Box::new(item),
                    min_length: traits.length.and_then(|l| l.min),
                    max_length: traits.length.and_then(|l| l.max),
                    unique_items: traits.has_unique_items(),
                }
            }
            Shape::Map { key, value, .. } => {
                let key_schema = self.map_key(shape_id, key, from, stack)?;
                let value_schema = self.nested(value, "map value", name, from, stack)?;
                Schema::Record {
                    key: Box::new(key_schema),
                    value: Box::new(value_schema),
                }
            }
            Shape::Union { members, .. } => {
                let mut alternatives = Vec::with_capacity(members.len());
                for (member_name, member) in members {
                    let owner = format!("{}.{}", name, member_name);
                    alternatives.push(self.nested(member, "union member", &owner, from, stack)?);
                }
                Schema::Union(alternatives)
            }
            Shape::Enum { .. }
            | Shape::Structure { .. }
            | Shape::Operation { .. }
            | Shape::Service { .. }
            | Shape::Other => return Ok(Schema::Unknown),
        };

        let notes = match (shape.kind(), shape.traits()) {
            (Some(kind), Some(traits)) => {
                let location = format!("{} {}", kind, shape_id);
                markers::unmapped_trait_notes(traits, inline_traits(kind), &location)
            }
            _ => Vec::new(),
        };
        Ok(notes
            .into_iter()
            .rev()
            .fold(schema, |inner, note| Schema::marked(note, inner)))
    }

    /// Validator of a timestamp shape: explicit format, else namespace default
    pub fn timestamp_schema(&self, shape_id: &str, traits: &Traits) -> Result<Schema> {
        if let Some(format) = traits.timestamp_format {
            return Ok(Schema::for_timestamp_format(format));
        }
        let id = ShapeId::parse(shape_id)?;
        if self.config.defaults_to_date_time(id.namespace) {
            Ok(Schema::DateTime)
        } else {
            Ok(Schema::HttpDate)
        }
    }

    /// Nested reference that degrades to a marked placeholder
    fn nested(
        &self,
        member: &Member,
        role: &str,
        owner: &str,
        from: &FileKey,
        stack: &mut Vec<String>,
    ) -> Result<Schema> {
        let resolution = self.resolve_in(&member.target, from, ResolveOptions::lazy(), stack)?;
        if resolution.resolved {
            return Ok(resolution.schema);
        }

        let note = markers::unresolved(role, &member.target, owner, resolution.recursive);
        tracing::warn!("{}", note);
        Ok(Schema::marked(note, resolution.schema))
    }

    /// Record key validator; anything but a string or enum key is fatal
    fn map_key(&self, map_id: &str, key: &Member, from: &FileKey, stack: &mut Vec<String>) -> Result<Schema> {
        let resolution = self.resolve_in(&key.target, from, ResolveOptions::lazy(), stack)?;
        if !resolution.resolved {
            return Err(GeneratorError::UnresolvedMapKey {
                map: map_id.to_string(),
                key: key.target.clone(),
            });
        }

        match resolution.kind {
            Some(kind) if kind.is_string_compatible() => Ok(resolution.schema),
            other => Err(GeneratorError::MapKeyNotString {
                map: map_id.to_string(),
                key: key.target.clone(),
                kind: other.map_or_else(|| "unit".to_string(), |k| k.to_string()),
            }),
        }
    }
}

/// Traits that shape the validator of an inlined kind
fn inline_traits(kind: ShapeKind) -> &'static [&'static str] {
    match kind {
        ShapeKind::Blob => &[trait_names::DOCUMENTATION, trait_names::STREAMING],
        ShapeKind::Integer => &[trait_names::DOCUMENTATION, trait_names::RANGE],
        ShapeKind::String => &[
            trait_names::DOCUMENTATION,
            trait_names::LENGTH,
            trait_names::PATTERN,
        ],
        ShapeKind::Timestamp => &[trait_names::DOCUMENTATION, trait_names::TIMESTAMP_FORMAT],
        ShapeKind::List => &[
            trait_names::DOCUMENTATION,
            trait_names::LENGTH,
            trait_names::UNIQUE_ITEMS,
        ],
        _ => &[trait_names::DOCUMENTATION],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::SubFile;
    use smithy_zod_gen_parser::smithy::SmithyParser;

    fn load(json: &str) -> (SmithyModel, SymbolTable) {
        let model = SmithyParser::from_json(json).unwrap().into_model();
        let mut symbols = SymbolTable::new("com.amazonaws.s3");
        symbols.discover(&model).unwrap();
        (model, symbols)
    }

    const MODEL: &str = r#"{
        "smithy": "2.0",
        "shapes": {
            "com.amazonaws.s3#Node": {
                "type": "structure",
                "members": { "Children": { "target": "com.amazonaws.s3#NodeList" } }
            },
            "com.amazonaws.s3#NodeList": {
                "type": "list",
                "member": { "target": "com.amazonaws.s3#Node" }
            },
            "com.amazonaws.s3#Nested": {
                "type": "list",
                "member": { "target": "com.amazonaws.s3#Choice" }
            },
            "com.amazonaws.s3#Choice": {
                "type": "union",
                "members": {
                    "Again": { "target": "com.amazonaws.s3#Nested" },
                    "Text": { "target": "smithy.api#String" }
                }
            },
            "com.amazonaws.s3#Class": { "type": "enum", "members": {} },
            "com.amazonaws.s3#Size": {
                "type": "integer",
                "traits": { "smithy.api#range": { "min": 0, "max": 10 } }
            },
            "com.amazonaws.s3#FlagMap": {
                "type": "map",
                "key": { "target": "smithy.api#Boolean" },
                "value": { "target": "smithy.api#String" }
            },
            "com.amazonaws.s3#Missing": {
                "type": "map",
                "key": { "target": "com.amazonaws.s3#Nope" },
                "value": { "target": "smithy.api#String" }
            },
            "com.amazonaws.s3#Stamp": { "type": "timestamp" },
            "com.amazonaws.other#Stamp": { "type": "timestamp" }
        }
    }"#;

    fn structures() -> FileKey {
        FileKey::primary(SubFile::Structures)
    }

    #[test]
    fn test_builtins_resolve_without_registration() {
        for target in [
            prelude::STRING,
            prelude::BOOLEAN,
            prelude::INTEGER,
            prelude::LONG,
            prelude::BLOB,
            prelude::TIMESTAMP,
            prelude::DOCUMENT,
            prelude::UNIT,
        ] {
            let resolution = Resolver::builtin(target).unwrap();
            assert!(resolution.resolved, "{} should resolve", target);
        }
        assert_eq!(Resolver::builtin(prelude::LONG).unwrap().schema, Schema::BigInt);
        assert_eq!(Resolver::builtin("com.amazonaws.s3#String"), None);
    }

    #[test]
    fn test_current_shape_is_placeholder() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let options = ResolveOptions {
            current_shape: Some("com.amazonaws.s3#Node"),
            lazy_for_same_file: true,
        };
        let resolution = resolver
            .resolve("com.amazonaws.s3#Node", &structures(), options)
            .unwrap();
        assert!(!resolution.resolved);
        assert_eq!(resolution.schema, Schema::Unknown);
    }

    #[test]
    fn test_standalone_references() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let same = resolver
            .resolve("com.amazonaws.s3#Node", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert!(matches!(same.schema, Schema::Lazy(_)));

        let eager = resolver
            .resolve("com.amazonaws.s3#Node", &structures(), ResolveOptions::default())
            .unwrap();
        assert!(matches!(eager.schema, Schema::Ref(ref r) if r.name == "nodeSchema"));

        let enum_ref = resolver
            .resolve("com.amazonaws.s3#Class", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert!(matches!(enum_ref.schema, Schema::Ref(ref r) if r.file_key == FileKey::primary(SubFile::Enums)));
        assert_eq!(enum_ref.kind, Some(ShapeKind::Enum));
    }

    #[test]
    fn test_list_of_structure_expands_inline_with_lazy_item() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let resolution = resolver
            .resolve("com.amazonaws.s3#NodeList", &structures(), ResolveOptions::lazy())
            .unwrap();
        let Schema::Array { item, .. } = resolution.schema else {
            panic!("expected an inline array");
        };
        assert!(matches!(*item, Schema::Lazy(_)));
    }

    #[test]
    fn test_inline_cycle_is_broken() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let resolution = resolver
            .resolve("com.amazonaws.s3#Nested", &structures(), ResolveOptions::lazy())
            .unwrap();
        let Schema::Array { item, .. } = resolution.schema else {
            panic!("expected an inline array");
        };
        let Schema::Union(alternatives) = *item else {
            panic!("expected an inline union");
        };
        assert!(matches!(
            &alternatives[0],
            Schema::Marked { comment, .. } if comment.contains("recursive reference")
        ));
        assert_eq!(alternatives[1], Schema::string());
    }

    #[test]
    fn test_integer_range_inline() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let resolution = resolver
            .resolve("com.amazonaws.s3#Size", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert_eq!(
            resolution.schema,
            Schema::Number {
                integer: true,
                min: Some(0.0),
                max: Some(10.0)
            }
        );
    }

    #[test]
    fn test_map_key_must_be_string_compatible() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let err = resolver
            .resolve("com.amazonaws.s3#FlagMap", &structures(), ResolveOptions::lazy())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not string-compatible"), "{}", message);
        assert!(message.contains("com.amazonaws.s3#FlagMap"));
        assert!(message.contains("smithy.api#Boolean"));

        let err = resolver
            .resolve("com.amazonaws.s3#Missing", &structures(), ResolveOptions::lazy())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnresolvedMapKey { .. }));
    }

    #[test]
    fn test_timestamp_defaults_by_namespace() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let primary = resolver
            .resolve("com.amazonaws.s3#Stamp", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert_eq!(primary.schema, Schema::DateTime);

        let other = resolver
            .resolve("com.amazonaws.other#Stamp", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert_eq!(other.schema, Schema::HttpDate);
    }

    #[test]
    fn test_unknown_target_is_unresolved() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let resolution = resolver
            .resolve("com.amazonaws.s3#Ghost", &structures(), ResolveOptions::lazy())
            .unwrap();
        assert!(!resolution.resolved);
        assert!(!resolution.recursive);
        assert_eq!(resolution.kind, None);
    }

    #[test]
    fn test_malformed_target_is_fatal() {
        let (model, symbols) = load(MODEL);
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let err = resolver
            .resolve("NoHash", &structures(), ResolveOptions::lazy())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::MalformedIdentifier { ref id } if id == "NoHash"));
    }

    #[test]
    fn test_unmapped_traits_wrap_inline_expansion() {
        let (model, symbols) = load(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#Keys": {
                        "type": "list",
                        "member": { "target": "smithy.api#String" },
                        "traits": {
                            "smithy.api#documentation": "Keys.",
                            "smithy.api#sparse": {},
                            "smithy.api#xmlFlattened": {}
                        }
                    }
                }
            }"#,
        );
        let config = CodegenConfig::default();
        let resolver = Resolver::new(&model, &symbols, &config);

        let resolution = resolver
            .resolve("com.amazonaws.s3#Keys", &structures(), ResolveOptions::lazy())
            .unwrap();
        let Schema::Marked { comment, inner } = resolution.schema else {
            panic!("expected a marked expansion");
        };
        assert!(comment.starts_with("UNMAPPED TRAIT: smithy.api#sparse ({}) on list com.amazonaws.s3#Keys"));
        let Schema::Marked { comment, inner } = *inner else {
            panic!("expected a second marker");
        };
        assert!(comment.starts_with("UNMAPPED TRAIT: smithy.api#xmlFlattened"));
        assert!(matches!(*inner, Schema::Array { .. }));
    }
}
