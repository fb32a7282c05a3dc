//! List, map and union shapes
//!
//! These kinds are inlined at usage sites like scalars. Generating them
//! expands each shape once: a map whose key is not string-compatible fails
//! here even when no structure uses the map, and unresolved list members,
//! map values and union alternatives are reported.

use super::{record_inline, ShapeEntry};
use crate::context::CodeGenContext;
use smithy_zod_gen_common::Result;

pub fn generate_lists(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        record_inline(ctx, *entry)?;
    }
    Ok(())
}

pub fn generate_maps(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        record_inline(ctx, *entry)?;
    }
    Ok(())
}

pub fn generate_unions(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        record_inline(ctx, *entry)?;
    }
    Ok(())
}
