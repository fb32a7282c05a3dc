//! Structure shapes
//!
//! Every structure, including error structures, gets an object validator
//! bound to `{name}Schema`. Each member field is the resolved target
//! validator followed by its constraint chain: member-level length and range
//! refinements, `.optional()` unless the member is required, then
//! `.default(...)` when the member carries a default.

use super::ShapeEntry;
use crate::context::CodeGenContext;
use crate::expr::Expr;
use crate::files::FileKey;
use crate::markers;
use crate::resolver::ResolveOptions;
use crate::schema::{Check, DefaultValue, Field, Schema};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use smithy_zod_gen_common::{GeneratorError, Result};
use smithy_zod_gen_parser::smithy::{trait_names, Member, Shape, ShapeId, ShapeKind, Traits};

const SHAPE_TRAITS: &[&str] = &[trait_names::DOCUMENTATION];

const ERROR_SHAPE_TRAITS: &[&str] = &[
    trait_names::DOCUMENTATION,
    trait_names::ERROR,
    trait_names::HTTP_ERROR,
];

const MEMBER_TRAITS: &[&str] = &[
    trait_names::DEFAULT,
    trait_names::DOCUMENTATION,
    trait_names::LENGTH,
    trait_names::RANGE,
    trait_names::REQUIRED,
    trait_names::TIMESTAMP_FORMAT,
];

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        let Shape::Structure { members, traits } = entry.shape else {
            continue;
        };
        let name = ShapeId::parse(entry.id)?.name;
        let symbol = ctx.symbol(entry.id)?.clone();

        let mapped = if entry.shape.is_error_structure() {
            ERROR_SHAPE_TRAITS
        } else {
            SHAPE_TRAITS
        };
        let mut leading: Vec<String> = markers::doc_comment(traits.documentation.as_deref())
            .into_iter()
            .collect();
        leading.extend(markers::unmapped_traits(
            traits,
            mapped,
            &format!("structure {}", name),
        ));

        let mut fields = Vec::with_capacity(members.len());
        for (member_name, member) in members {
            fields.push(member_field(ctx, name, member_name, member, &symbol.file_key)?);
        }

        let schema = Schema::Object(fields);
        let binding = Expr::export_const(
            &leading,
            &symbol.schema_name,
            schema.lower(&symbol.file_key, &ctx.modules()),
        );

        tracing::debug!(shape = entry.id, members = members.len(), "Generated structure");
        ctx.add_schema(entry.id, schema);
        ctx.add_code(symbol.file_key.clone(), binding);
    }
    Ok(())
}

/// Field of the object validator for one member
fn member_field(
    ctx: &CodeGenContext<'_>,
    structure: &str,
    member_name: &str,
    member: &Member,
    file_key: &FileKey,
) -> Result<Field> {
    let location = format!("structure member {}.{}", structure, member_name);

    let mut comments: Vec<String> = markers::doc_comment(member.traits.documentation.as_deref())
        .into_iter()
        .collect();
    comments.extend(markers::unmapped_traits(&member.traits, MEMBER_TRAITS, &location));

    let resolution = ctx
        .resolver()
        .resolve(&member.target, file_key, ResolveOptions::lazy())?;

    let schema = if resolution.resolved {
        let target = match (resolution.kind, member.traits.timestamp_format) {
            (Some(ShapeKind::Timestamp), Some(format)) => resolution
                .schema
                .replace_marked_inner(Schema::for_timestamp_format(format)),
            _ => resolution.schema,
        };
        let constrained = constraint_chain(target, &member.traits);
        match &member.traits.default {
            Some(value) => {
                constrained.with_default(default_value(value, resolution.kind, &location)?)
            }
            None => constrained,
        }
    } else {
        let owner = format!("{}.{}", structure, member_name);
        let note = markers::unresolved("structure member", &member.target, &owner, resolution.recursive);
        tracing::warn!("{}", note);
        comments.push(format!("// {}", note));
        optional_unless_required(Schema::Unknown, &member.traits)
    };

    Ok(Field {
        name: member_name.to_string(),
        schema,
        comments,
    })
}

/// Member-level refinements followed by optionality
pub fn constraint_chain(target: Schema, traits: &Traits) -> Schema {
    let mut schema = target;
    if let Some(length) = traits.length {
        if let Some(min) = length.min {
            schema = schema.refine(Check::MinLength(min));
        }
        if let Some(max) = length.max {
            schema = schema.refine(Check::MaxLength(max));
        }
    }
    if let Some(range) = traits.range {
        if let Some(min) = range.min {
            schema = schema.refine(Check::MinValue(min));
        }
        if let Some(max) = range.max {
            schema = schema.refine(Check::MaxValue(max));
        }
    }
    optional_unless_required(schema, traits)
}

fn optional_unless_required(schema: Schema, traits: &Traits) -> Schema {
    if traits.is_required() {
        schema
    } else {
        schema.optional()
    }
}

/// Coerce a `default` trait value to the literal its target kind accepts
pub fn default_value(value: &Value, kind: Option<ShapeKind>, location: &str) -> Result<DefaultValue> {
    let Some(kind) = kind else {
        return Err(GeneratorError::MissingDefaultTarget {
            location: location.to_string(),
        });
    };
    let unsupported = |reason: String| GeneratorError::UnsupportedDefault {
        location: location.to_string(),
        reason,
    };

    match kind {
        ShapeKind::Blob => {
            let encoded = value.as_str().ok_or_else(|| {
                unsupported("blob targets require a base64 string default.".to_string())
            })?;
            let bytes = STANDARD
                .decode(encoded)
                .map_err(|e| unsupported(format!("invalid base64 default ({}).", e)))?;
            Ok(DefaultValue::Bytes(bytes))
        }
        ShapeKind::Boolean => value.as_bool().map(DefaultValue::Bool).ok_or_else(|| {
            unsupported("boolean targets require a boolean default.".to_string())
        }),
        ShapeKind::String | ShapeKind::Enum | ShapeKind::Timestamp => value
            .as_str()
            .map(|text| DefaultValue::String(text.to_string()))
            .ok_or_else(|| unsupported(format!("{} targets require a string default.", kind))),
        ShapeKind::Document => Ok(DefaultValue::Json(value.clone())),
        other => Err(GeneratorError::UnsupportedDefaultTarget {
            location: location.to_string(),
            kind: other.to_string(),
        }),
    }
}
