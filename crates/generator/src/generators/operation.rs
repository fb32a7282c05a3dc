//! Operation shapes
//!
//! Operations emit nothing on their own. Each one produces an
//! [`OperationSignature`] that the service generator turns into an interface
//! method, which is why operations are generated before services.

use super::ShapeEntry;
use crate::context::CodeGenContext;
use crate::expr::Expr;
use crate::files::FileKey;
use crate::markers;
use crate::naming;
use crate::schema::{Modules, Schema, SchemaRef};
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{prelude, Shape, ShapeId, ShapeReference};

/// Type of an operation's input or output
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// `z.infer<typeof schema>` of a standalone binding
    Infer(SchemaRef),
    /// Target has no binding
    Unknown,
    /// `smithy.api#Unit` or absent
    Void,
}

impl TypeRef {
    pub fn lower(&self, from: &FileKey, modules: &Modules<'_>) -> Expr {
        match self {
            TypeRef::Infer(reference) => Expr::Seq(vec![
                Expr::import("z", modules.zod),
                Expr::raw(".infer<typeof "),
                Schema::Ref(reference.clone()).lower(from, modules),
                Expr::raw(">"),
            ]),
            TypeRef::Unknown => Expr::raw("unknown"),
            TypeRef::Void => Expr::raw("void"),
        }
    }
}

/// Interface method derived from an operation shape
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSignature {
    pub method_name: String,
    pub input: TypeRef,
    pub output: TypeRef,
    /// TSDoc block with documentation and `@throws` entries
    pub doc: Option<String>,
    /// Marker naming unresolved input/output targets
    pub unresolved_comment: Option<String>,
}

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        let Shape::Operation {
            input,
            output,
            errors,
            traits,
        } = entry.shape
        else {
            continue;
        };
        let name = ShapeId::parse(entry.id)?.name;

        let view = &*ctx;
        let (input_type, unresolved_input) = type_ref(view, input.as_ref())?;
        let (output_type, unresolved_output) = type_ref(view, output.as_ref())?;
        let unresolved: Vec<&str> = [unresolved_input, unresolved_output]
            .into_iter()
            .flatten()
            .collect();

        let unresolved_comment = (!unresolved.is_empty()).then(|| {
            format!(
                "// UNRESOLVED: operation {} references unresolved target(s): {}.",
                name,
                unresolved.join(", ")
            )
        });
        if let Some(comment) = &unresolved_comment {
            tracing::warn!(operation = entry.id, "{}", comment);
        }

        let throws = errors
            .iter()
            .map(|error| throws_line(view, error))
            .collect::<Result<Vec<_>>>()?;
        let signature = OperationSignature {
            method_name: naming::method_name(name),
            input: input_type,
            output: output_type,
            doc: tsdoc(traits.documentation.as_deref(), &throws),
            unresolved_comment,
        };

        tracing::debug!(operation = entry.id, method = %signature.method_name, "Registered operation");
        ctx.register_operation(entry.id, signature);
    }
    Ok(())
}

/// Input or output type, plus the target when it has no binding
fn type_ref<'r>(
    ctx: &CodeGenContext<'_>,
    reference: Option<&'r ShapeReference>,
) -> Result<(TypeRef, Option<&'r str>)> {
    let Some(target) = reference.map(|r| r.target.as_str()) else {
        return Ok((TypeRef::Void, None));
    };
    if target == prelude::UNIT {
        return Ok((TypeRef::Void, None));
    }
    ShapeId::parse(target)?;

    Ok(match ctx.symbols().lookup(target) {
        Some(symbol) if symbol.is_standalone() => (
            TypeRef::Infer(SchemaRef {
                shape_id: target.to_string(),
                name: symbol.schema_name.clone(),
                file_key: symbol.file_key.clone(),
                kind: symbol.kind,
            }),
            None,
        ),
        _ => (TypeRef::Unknown, Some(target)),
    })
}

/// ` * @throws {Type} description` for one modeled error
fn throws_line(ctx: &CodeGenContext<'_>, error: &ShapeReference) -> Result<String> {
    ShapeId::parse(&error.target)?;
    let (type_name, description) = match ctx.symbols().lookup(&error.target) {
        Some(symbol) => {
            let documentation = ctx
                .model()
                .get_shape(&error.target)
                .and_then(Shape::traits)
                .and_then(|traits| traits.documentation.as_deref())
                .map(|doc| doc.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|doc| !doc.is_empty());
            let description = documentation
                .unwrap_or_else(|| format!("This operation may throw {}.", symbol.type_name));
            (symbol.type_name.clone(), description)
        }
        None => (
            "unknown".to_string(),
            format!("This operation may throw an unknown error type ({}).", error.target),
        ),
    };
    Ok(format!(
        " * @throws {{{}}} {}",
        type_name,
        markers::escape_comment(&description)
    ))
}

/// Documentation block, followed by `@throws` lines when there are errors
fn tsdoc(documentation: Option<&str>, throws: &[String]) -> Option<String> {
    if throws.is_empty() {
        return markers::doc_comment(documentation);
    }

    let mut lines = vec!["/**".to_string()];
    if let Some(doc_lines) = documentation.and_then(markers::doc_lines) {
        lines.extend(doc_lines);
        lines.push(" *".to_string());
    }
    lines.extend(throws.iter().cloned());
    lines.push(" */".to_string());
    Some(lines.join("\n"))
}
