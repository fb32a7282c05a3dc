//! Validator IR
//!
//! Resolver and generators describe validators as [`Schema`] values. A schema
//! is lowered to an [`Expr`] for a specific file, which decides whether a
//! reference is a bare symbol or an import. The same value drives the
//! in-process evaluator in [`crate::validate`].

use crate::expr::{Expr, Property};
use crate::files::FileKey;
use smithy_zod_gen_parser::smithy::{ShapeKind, TimestampFormat};
use smithy_zod_gen_runtime::timestamp::{DATE_TIME_SCHEMA, HTTP_DATE_SCHEMA};

/// A validator in the schema vocabulary of the generated code
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<String>,
    },
    Number {
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// 64-bit integer
    BigInt,
    Boolean,
    /// Byte array
    Bytes,
    /// Accepts anything
    Unknown,
    DateTime,
    HttpDate,
    EpochSeconds,
    /// Validator bound to a generated enum declaration
    Enum { type_name: String, values: Vec<String> },
    Array {
        item: Box<Schema>,
        min_length: Option<u64>,
        max_length: Option<u64>,
        unique_items: bool,
    },
    Record { key: Box<Schema>, value: Box<Schema> },
    Union(Vec<Schema>),
    Object(Vec<Field>),
    /// Reference to another shape's standalone binding
    Ref(SchemaRef),
    /// Deferred reference, breaks definition-order and cycles
    Lazy(Box<Schema>),
    Refine { inner: Box<Schema>, check: Check },
    Optional(Box<Schema>),
    Default { inner: Box<Schema>, value: DefaultValue },
    /// Inline position carrying a visible marker comment
    Marked { comment: String, inner: Box<Schema> },
}

/// Object field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    /// Doc block and marker lines emitted above the field
    pub comments: Vec<String>,
}

/// Standalone binding of a registered shape
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRef {
    pub shape_id: String,
    pub name: String,
    pub file_key: FileKey,
    pub kind: ShapeKind,
}

/// Custom refinement attached to a structure member
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    MinLength(u64),
    MaxLength(u64),
    MinValue(f64),
    MaxValue(f64),
}

/// Literal default value of a structure member
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

/// Modules referenced while lowering
#[derive(Debug, Clone, Copy)]
pub struct Modules<'a> {
    pub zod: &'a str,
    pub runtime: &'a str,
    pub shared_prefix: Option<&'a str>,
}

impl Schema {
    pub fn string() -> Self {
        Schema::String {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn integer() -> Self {
        Schema::Number {
            integer: true,
            min: None,
            max: None,
        }
    }

    pub fn for_timestamp_format(format: TimestampFormat) -> Self {
        match format {
            TimestampFormat::DateTime => Schema::DateTime,
            TimestampFormat::HttpDate => Schema::HttpDate,
            TimestampFormat::EpochSeconds => Schema::EpochSeconds,
        }
    }

    pub fn marked(comment: impl Into<String>, inner: Schema) -> Self {
        Schema::Marked {
            comment: comment.into(),
            inner: Box::new(inner),
        }
    }

    /// Swap the schema under any comment markers for `replacement`
    pub fn replace_marked_inner(self, replacement: Schema) -> Self {
        match self {
            Schema::Marked { comment, inner } => Schema::Marked {
                comment,
                inner: Box::new(inner.replace_marked_inner(replacement)),
            },
            _ => replacement,
        }
    }

    pub fn refine(self, check: Check) -> Self {
        Schema::Refine {
            inner: Box::new(self),
            check,
        }
    }

    pub fn optional(self) -> Self {
        Schema::Optional(Box::new(self))
    }

    pub fn with_default(self, value: DefaultValue) -> Self {
        Schema::Default {
            inner: Box::new(self),
            value,
        }
    }

    /// Lower to an expression as seen from the file `from`
    pub fn lower(&self, from: &FileKey, modules: &Modules<'_>) -> Expr {
        let z = || Expr::import("z", modules.zod);

        match self {
            Schema::String {
                min_length,
                max_length,
                pattern,
            } => {
                let mut expr = z().method("string", vec![]);
                if let Some(min) = min_length {
                    expr = expr.method("min", vec![Expr::Raw(min.to_string())]);
                }
                if let Some(max) = max_length {
                    expr = expr.method("max", vec![Expr::Raw(max.to_string())]);
                }
                if let Some(pattern) = pattern {
                    let regexp = Expr::Call {
                        callee: Box::new(Expr::raw("new RegExp")),
                        args: vec![Expr::Str(anchored(pattern))],
                    };
                    expr = expr.method("regex", vec![regexp]);
                }
                expr
            }
            Schema::Number { integer, min, max } => {
                let mut expr = z().method("number", vec![]);
                if *integer {
                    expr = expr.method("int", vec![]);
                }
                if let Some(min) = min {
                    expr = expr.method("min", vec![Expr::Raw(js_number(*min))]);
                }
                if let Some(max) = max {
                    expr = expr.method("max", vec![Expr::Raw(js_number(*max))]);
                }
                expr
            }
            Schema::BigInt => z().method("bigint", vec![]),
            Schema::Boolean => z().method("boolean", vec![]),
            Schema::Bytes => z().method("instanceof", vec![Expr::raw("Uint8Array")]),
            Schema::Unknown => z().method("unknown", vec![]),
            Schema::DateTime => Expr::import(DATE_TIME_SCHEMA, modules.runtime),
            Schema::HttpDate => Expr::import(HTTP_DATE_SCHEMA, modules.runtime),
            Schema::EpochSeconds => z().method("number", vec![]),
            Schema::Enum { type_name, .. } => {
                z().method("enum", vec![Expr::Symbol(type_name.clone())])
            }
            Schema::Array {
                item,
                min_length,
                max_length,
                unique_items,
            } => {
                let mut expr = z().method("array", vec![item.lower(from, modules)]);
                if let Some(min) = min_length {
                    expr = expr.method("min", vec![Expr::Raw(min.to_string())]);
                }
                if let Some(max) = max_length {
                    expr = expr.method("max", vec![Expr::Raw(max.to_string())]);
                }
                if *unique_items {
                    expr = expr.method("superRefine", vec![Expr::raw(UNIQUE_ITEMS_REFINEMENT)]);
                }
                expr
            }
            Schema::Record { key, value } => {
                // exhaustive records would demand every enum member as a key
                let constructor = if key.is_enum_ref() {
                    "partialRecord"
                } else {
                    "record"
                };
                z().method(
                    constructor,
                    vec![key.lower(from, modules), value.lower(from, modules)],
                )
            }
            Schema::Union(members) => {
                if members.is_empty() {
                    return z().method("never", vec![]);
                }
                let members = members.iter().map(|m| m.lower(from, modules)).collect();
                z().method("union", vec![Expr::Array(members)])
            }
            Schema::Object(fields) => {
                let properties = fields
                    .iter()
                    .map(|field| Property {
                        key: field.name.clone(),
                        value: field.schema.lower(from, modules),
                        leading: field.comments.clone(),
                    })
                    .collect();
                z().method("object", vec![Expr::Object(properties)])
            }
            Schema::Ref(reference) => {
                if &reference.file_key == from {
                    Expr::Symbol(reference.name.clone())
                } else {
                    Expr::import(
                        reference.name.clone(),
                        reference.file_key.import_path(from, modules.shared_prefix),
                    )
                }
            }
            Schema::Lazy(inner) => z().method(
                "lazy",
                vec![Expr::Arrow(Box::new(inner.lower(from, modules)))],
            ),
            Schema::Refine { inner, check } => inner
                .lower(from, modules)
                .method("superRefine", vec![Expr::Raw(refinement_block(*check))]),
            Schema::Optional(inner) => inner.lower(from, modules).method("optional", vec![]),
            Schema::Default { inner, value } => inner
                .lower(from, modules)
                .method("default", vec![default_expr(value)]),
            Schema::Marked { comment, inner } => Expr::Commented {
                comment: comment.clone(),
                inner: Box::new(inner.lower(from, modules)),
            },
        }
    }

    fn is_enum_ref(&self) -> bool {
        match self {
            Schema::Ref(reference) => reference.kind == ShapeKind::Enum,
            Schema::Lazy(inner) => inner.is_enum_ref(),
            _ => false,
        }
    }
}

/// Wrap a pattern so that it must match the whole value
pub fn anchored(pattern: &str) -> String {
    let escaped_end = pattern.ends_with("\\$") && !pattern.ends_with("\\\\$");
    if pattern.starts_with('^') && pattern.ends_with('$') && !escaped_end {
        pattern.to_string()
    } else {
        format!("^(?:{})$", pattern)
    }
}

/// Number literal as JavaScript prints it
pub fn js_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn default_expr(value: &DefaultValue) -> Expr {
    match value {
        DefaultValue::String(text) => Expr::Str(text.clone()),
        DefaultValue::Bool(flag) => Expr::Raw(flag.to_string()),
        DefaultValue::Bytes(bytes) => {
            let list: Vec<String> = bytes.iter().map(u8::to_string).collect();
            Expr::Raw(format!("new Uint8Array([{}])", list.join(", ")))
        }
        DefaultValue::Json(json) => Expr::Raw(json.to_string()),
    }
}

const UNIQUE_ITEMS_REFINEMENT: &str = r#"(items, refinementContext) => {
  const seen = new Map<string, number>();
  for (let index = 0; index < items.length; index += 1) {
    const serialized = JSON.stringify(items[index]);
    const key = serialized === undefined ? "__undefined__" : serialized;
    if (seen.has(key)) {
      refinementContext.addIssue({
        code: "custom",
        message: "Duplicate items are not allowed.",
        path: [index],
      });
      return;
    }
    seen.set(key, index);
  }
}"#;

fn refinement_block(check: Check) -> String {
    let (condition, code, bound_key, bound, origin) = match check {
        Check::MinLength(min) => (
            format!("typeof currentLength === \"number\" && currentLength < {}", min),
            "too_small",
            "minimum",
            min.to_string(),
            "array",
        ),
        Check::MaxLength(max) => (
            format!("typeof currentLength === \"number\" && currentLength > {}", max),
            "too_big",
            "maximum",
            max.to_string(),
            "array",
        ),
        Check::MinValue(min) => (
            format!("typeof value === \"number\" && value < {}", js_number(min)),
            "too_small",
            "minimum",
            js_number(min),
            "number",
        ),
        Check::MaxValue(max) => (
            format!("typeof value === \"number\" && value > {}", js_number(max)),
            "too_big",
            "maximum",
            js_number(max),
            "number",
        ),
    };

    let preamble = match check {
        Check::MinLength(_) | Check::MaxLength(_) => {
            "  const valueWithLength = value as { length?: number } | null | undefined;\n  const currentLength = valueWithLength?.length;\n"
        }
        Check::MinValue(_) | Check::MaxValue(_) => "",
    };

    format!(
        "(value, refinementContext) => {{\n{preamble}  if ({condition}) {{\n    refinementContext.addIssue({{\n      code: \"{code}\",\n      {bound_key}: {bound},\n      inclusive: true,\n      origin: \"{origin}\",\n      path: [],\n    }});\n  }}\n}}"
    )
}
