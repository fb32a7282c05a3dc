//! Scalar shapes: blob, boolean, document, integer, long, string, timestamp
//!
//! Scalars have no standalone binding. Their validators (with range, length
//! and pattern constraints, or the namespace's timestamp format) are inlined
//! wherever a member targets them.

use super::{record_inline, ShapeEntry};
use crate::context::CodeGenContext;
use smithy_zod_gen_common::Result;

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        record_inline(ctx, *entry)?;
    }
    Ok(())
}
