//! Per-kind shape generators
//!
//! Each generator takes the entries of one shape kind and adds fragments to
//! the [`CodeGenContext`]. [`generate_all`] runs them in dependency order:
//! scalars, enums, structures and their error classes, lists, maps, unions,
//! operations, then services.

pub mod collections;
pub mod enums;
pub mod errors;
pub mod operation;
pub mod scalar;
pub mod service;
pub mod structure;

pub use operation::{OperationSignature, TypeRef};

use crate::context::CodeGenContext;
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{Shape, ShapeKind, SmithyModel};

/// A shape and its identifier
#[derive(Debug, Clone, Copy)]
pub struct ShapeEntry<'a> {
    pub id: &'a str,
    pub shape: &'a Shape,
}

/// Scalar kinds, in generation order
pub const SCALAR_KINDS: [ShapeKind; 7] = [
    ShapeKind::Blob,
    ShapeKind::Boolean,
    ShapeKind::Document,
    ShapeKind::Integer,
    ShapeKind::Long,
    ShapeKind::String,
    ShapeKind::Timestamp,
];

/// Entries of one kind, in model order
pub fn entries_of(model: &SmithyModel, kind: ShapeKind) -> Vec<ShapeEntry<'_>> {
    model
        .shapes
        .iter()
        .filter(|(_, shape)| shape.kind() == Some(kind))
        .map(|(id, shape)| ShapeEntry {
            id: id.as_str(),
            shape,
        })
        .collect()
}

/// Run every generator over the model
pub fn generate_all(ctx: &mut CodeGenContext<'_>) -> Result<()> {
    let model = ctx.model();

    for kind in SCALAR_KINDS {
        scalar::generate(ctx, &entries_of(model, kind))?;
    }

    enums::generate(ctx, &entries_of(model, ShapeKind::Enum))?;

    let structures = entries_of(model, ShapeKind::Structure);
    structure::generate(ctx, &structures)?;
    let error_structures: Vec<ShapeEntry<'_>> = structures
        .into_iter()
        .filter(|entry| entry.shape.is_error_structure())
        .collect();
    errors::generate(ctx, &error_structures)?;

    collections::generate_lists(ctx, &entries_of(model, ShapeKind::List))?;
    collections::generate_maps(ctx, &entries_of(model, ShapeKind::Map))?;
    collections::generate_unions(ctx, &entries_of(model, ShapeKind::Union))?;

    operation::generate(ctx, &entries_of(model, ShapeKind::Operation))?;
    service::generate(ctx, &entries_of(model, ShapeKind::Service))?;

    Ok(())
}

/// Expand a shape that is inlined at its usage sites
///
/// Nothing is emitted, but the expansion runs once per shape so that fatal
/// conditions surface even for shapes nothing references. The expanded
/// schema is kept for validation.
pub(crate) fn record_inline(ctx: &mut CodeGenContext<'_>, entry: ShapeEntry<'_>) -> Result<()> {
    let file_key = ctx.output_file_key(entry.id)?;
    let schema = {
        let resolver = ctx.resolver();
        let mut stack = vec![entry.id.to_string()];
        resolver.expand(entry.id, &file_key, &mut stack)?
    };

    tracing::debug!(shape = entry.id, "Shape is inlined at usage sites");

    ctx.add_schema(entry.id, schema);
    Ok(())
}
