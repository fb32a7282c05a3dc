//! Error classes for structures carrying the `error` trait
//!
//! The class is emitted into the errors sub-file next to the structure's own
//! validator. Its wire code is the shape name exactly as modeled.

use super::ShapeEntry;
use crate::context::CodeGenContext;
use crate::expr::Expr;
use crate::naming::quote;
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{Shape, ShapeId};

/// Base class of generated errors, provided by the runtime module
pub const AWS_ERROR: &str = "AwsError";

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        let Shape::Structure { traits, .. } = entry.shape else {
            continue;
        };
        let name = ShapeId::parse(entry.id)?.name;
        let symbol = ctx.symbol(entry.id)?.clone();

        let message = traits
            .documentation
            .as_deref()
            .map_or_else(|| "undefined".to_string(), quote);
        let http_status = traits
            .http_error
            .map_or_else(|| "undefined".to_string(), |status| status.to_string());

        let class = Expr::Seq(vec![
            Expr::Raw(format!("export class {} extends ", symbol.type_name)),
            Expr::import(AWS_ERROR, ctx.config().imports.runtime.as_str()),
            Expr::Raw(format!(
                " {{\n  constructor() {{\n    super({}, {}, {});\n    this.name = {};\n  }}\n}}",
                quote(name),
                message,
                http_status,
                quote(&symbol.type_name)
            )),
        ]);

        tracing::debug!(shape = entry.id, class = %symbol.type_name, "Generated error class");
        ctx.add_code(symbol.file_key.clone(), class);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{FileKey, SubFile};
    use crate::generators::entries_of;
    use smithy_zod_gen_common::CodegenConfig;
    use smithy_zod_gen_parser::smithy::{ShapeKind, SmithyParser};

    #[test]
    fn test_error_class() {
        let model = SmithyParser::from_json(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#NoSuchKey": {
                        "type": "structure",
                        "members": {},
                        "traits": {
                            "smithy.api#error": "client",
                            "smithy.api#httpError": 404,
                            "smithy.api#documentation": "The specified key does not exist."
                        }
                    },
                    "com.amazonaws.s3#bucket_already_exists": {
                        "type": "structure",
                        "members": {},
                        "traits": { "smithy.api#error": "client" }
                    }
                }
            }"#,
        )
        .unwrap()
        .into_model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);
        ctx.discover().unwrap();
        generate(&mut ctx, &entries_of(&model, ShapeKind::Structure)).unwrap();

        let tera = crate::templates::load_templates().unwrap();
        let files = ctx.render_files(&tera).unwrap();
        let errors = &files[&FileKey::primary(SubFile::Errors)];

        assert!(errors.contains("import { AwsError } from \"aws-api-shared\";"));
        assert!(errors.contains(
            "export class NoSuchKeyError extends AwsError {\n  constructor() {\n    super(\"NoSuchKey\", \"The specified key does not exist.\", 404);\n    this.name = \"NoSuchKeyError\";\n  }\n}"
        ));
        assert!(errors.contains(
            "super(\"bucket_already_exists\", undefined, undefined);\n    this.name = \"BucketAlreadyExistsError\";"
        ));
    }
}
