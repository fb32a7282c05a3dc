//! Service shapes
//!
//! One interface per service, one method per operation in modeled order,
//! separated by a blank line.

use super::ShapeEntry;
use crate::context::CodeGenContext;
use crate::expr::Expr;
use crate::files::FileKey;
use crate::markers;
use crate::naming;
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{Shape, ShapeId};

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        let Shape::Service {
            operations, traits, ..
        } = entry.shape
        else {
            continue;
        };
        let name = ShapeId::parse(entry.id)?.name;
        let file_key = ctx.output_file_key(entry.id)?;
        let interface = naming::service_interface_name(name);

        let mut methods = Vec::with_capacity(operations.len());
        for operation in operations {
            methods.push(method(ctx, &operation.target, &file_key)?);
        }

        let mut parts = Vec::new();
        if let Some(doc) = markers::doc_comment(traits.documentation.as_deref()) {
            parts.push(Expr::Raw(format!("{}\n", doc)));
        }
        if methods.is_empty() {
            parts.push(Expr::Raw(format!("export interface {} {{}}", interface)));
        } else {
            parts.push(Expr::Raw(format!("export interface {} {{\n", interface)));
            for (i, method) in methods.into_iter().enumerate() {
                if i > 0 {
                    parts.push(Expr::raw("\n\n"));
                }
                parts.extend(method);
            }
            parts.push(Expr::raw("\n}"));
        }

        tracing::debug!(service = entry.id, operations = operations.len(), "Generated service interface");
        ctx.add_code(file_key, Expr::Seq(parts));
    }
    Ok(())
}

/// Parts of one method declaration, indented for the interface body
fn method(ctx: &CodeGenContext<'_>, target: &str, file_key: &FileKey) -> Result<Vec<Expr>> {
    let Some(signature) = ctx.operation(target) else {
        let fallback = naming::method_name(ShapeId::parse(target)?.name);
        let note = format!("UNRESOLVED: operation target {} is not generated.", target);
        tracing::warn!("{}", note);
        return Ok(vec![Expr::Raw(format!(
            "  // {}\n  {}(input: unknown): unknown;",
            note, fallback
        ))]);
    };

    let mut header = String::new();
    let comments = signature.unresolved_comment.iter().chain(signature.doc.iter());
    for block in comments {
        for line in block.split('\n') {
            header.push_str("  ");
            header.push_str(line);
            header.push('\n');
        }
    }
    header.push_str(&format!("  {}(input: ", signature.method_name));

    let modules = ctx.modules();
    Ok(vec![
        Expr::Raw(header),
        signature.input.lower(file_key, &modules),
        Expr::raw("): "),
        signature.output.lower(file_key, &modules),
        Expr::raw(";"),
    ])
}

#[cfg(test)]
mod tests {
    use crate::context::CodeGenContext;
    use crate::files::{FileKey, SubFile};
    use smithy_zod_gen_common::CodegenConfig;
    use smithy_zod_gen_parser::smithy::SmithyParser;

    fn service_file(json: &str) -> String {
        let model = SmithyParser::from_json(json).unwrap().into_model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);
        ctx.generate().unwrap();

        let tera = crate::templates::load_templates().unwrap();
        let mut files = ctx.render_files(&tera).unwrap();
        files.remove(&FileKey::primary(SubFile::Service)).unwrap()
    }

    #[test]
    fn test_empty_service() {
        let service = service_file(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#AmazonS3": { "type": "service", "version": "2006-03-01" }
                }
            }"#,
        );
        assert!(service.ends_with("export interface AmazonS3Service {}\n"));
    }

    #[test]
    fn test_methods_follow_modeled_order() {
        let service = service_file(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#AmazonS3": {
                        "type": "service",
                        "operations": [
                            { "target": "com.amazonaws.s3#PutObject" },
                            { "target": "com.amazonaws.s3#DeleteObject" }
                        ]
                    },
                    "com.amazonaws.s3#DeleteObject": { "type": "operation" },
                    "com.amazonaws.s3#PutObject": {
                        "type": "operation",
                        "input": { "target": "com.amazonaws.s3#PutObjectRequest" }
                    },
                    "com.amazonaws.s3#PutObjectRequest": { "type": "structure", "members": {} }
                }
            }"#,
        );
        assert!(service.contains(
            "export interface AmazonS3Service {\n  putObject(input: z.infer<typeof putObjectRequestSchema>): void;\n\n  deleteObject(input: void): void;\n}"
        ));
        assert!(service.contains("import { putObjectRequestSchema } from \"./structures.js\";"));
    }
}
