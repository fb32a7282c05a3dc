//! Enum shapes
//!
//! Each enum becomes a TypeScript `enum` declaration plus a validator bound
//! to it. Member keys are kept as modeled (quoted when they are not valid
//! identifiers); the member value is the `enumValue` trait, else the key.
//! Documentation goes on the declaration, never on the validator.

use super::ShapeEntry;
use crate::context::CodeGenContext;
use crate::expr::Expr;
use crate::markers;
use crate::naming::{property_key, quote};
use crate::schema::Schema;
use indexmap::IndexMap;
use smithy_zod_gen_common::Result;
use smithy_zod_gen_parser::smithy::{trait_names, Member, Shape, ShapeId};

const SHAPE_TRAITS: &[&str] = &[trait_names::DOCUMENTATION];
const MEMBER_TRAITS: &[&str] = &[trait_names::DOCUMENTATION, trait_names::ENUM_VALUE];

pub fn generate(ctx: &mut CodeGenContext<'_>, entries: &[ShapeEntry<'_>]) -> Result<()> {
    for entry in entries {
        let Shape::Enum { members, traits } = entry.shape else {
            continue;
        };
        let name = ShapeId::parse(entry.id)?.name;
        let symbol = ctx.symbol(entry.id)?.clone();

        let mut leading: Vec<String> = markers::doc_comment(traits.documentation.as_deref())
            .into_iter()
            .collect();
        leading.extend(markers::unmapped_traits(
            traits,
            SHAPE_TRAITS,
            &format!("enum {}", name),
        ));

        let declaration = declaration(&symbol.type_name, name, members, &leading);
        let schema = Schema::Enum {
            type_name: symbol.type_name.clone(),
            values: members
                .iter()
                .map(|(key, member)| enum_value(key, member).to_string())
                .collect(),
        };
        let binding = Expr::export_const(
            &[],
            &symbol.schema_name,
            schema.lower(&symbol.file_key, &ctx.modules()),
        );

        tracing::debug!(shape = entry.id, members = members.len(), "Generated enum");
        ctx.add_schema(entry.id, schema);
        ctx.add_code(symbol.file_key.clone(), Expr::Seq(vec![declaration, Expr::raw("\n"), binding]));
    }
    Ok(())
}

fn enum_value<'m>(key: &'m str, member: &'m Member) -> &'m str {
    member.traits.enum_value_str().unwrap_or(key)
}

/// `export enum TypeName { ... }` with documentation and markers
fn declaration(
    type_name: &str,
    name: &str,
    members: &IndexMap<String, Member>,
    leading: &[String],
) -> Expr {
    let mut lines: Vec<String> = leading.to_vec();
    if members.is_empty() {
        lines.push(format!("export enum {} {{}}", type_name));
        return Expr::Raw(lines.join("\n"));
    }

    lines.push(format!("export enum {} {{", type_name));
    for (key, member) in members {
        let mut comments: Vec<String> =
            markers::doc_comment(member.traits.documentation.as_deref())
                .into_iter()
                .collect();
        comments.extend(markers::unmapped_traits(
            &member.traits,
            MEMBER_TRAITS,
            &format!("enum member {}.{}", name, key),
        ));
        for block in comments {
            lines.extend(block.split('\n').map(|line| format!("  {}", line)));
        }
        lines.push(format!(
            "  {} = {},",
            property_key(key),
            quote(enum_value(key, member))
        ));
    }
    lines.push("}".to_string());
    Expr::Raw(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Renderer;
    use crate::files::{FileKey, SubFile};
    use crate::generators::entries_of;
    use smithy_zod_gen_common::CodegenConfig;
    use smithy_zod_gen_parser::smithy::{ShapeKind, SmithyParser};

    #[test]
    fn test_enum_declaration_and_binding() {
        let model = SmithyParser::from_json(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#StorageClass": {
                        "type": "enum",
                        "members": {
                            "STANDARD": {
                                "target": "smithy.api#Unit",
                                "traits": {
                                    "smithy.api#enumValue": "STANDARD",
                                    "smithy.api#documentation": "Default class."
                                }
                            },
                            "ONEZONE_IA": { "target": "smithy.api#Unit" },
                            "x-amz-glacier": {
                                "target": "smithy.api#Unit",
                                "traits": { "smithy.api#enumValue": "GLACIER" }
                            }
                        },
                        "traits": { "smithy.api#documentation": "Storage classes." }
                    }
                }
            }"#,
        )
        .unwrap()
        .into_model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);
        ctx.discover().unwrap();
        generate(&mut ctx, &entries_of(&model, ShapeKind::Enum)).unwrap();

        let tera = crate::templates::load_templates().unwrap();
        let files = ctx.render_files(&tera).unwrap();
        let enums = &files[&FileKey::primary(SubFile::Enums)];

        assert!(enums.contains(
            "/**\n * ```xml\n * Storage classes.\n * ```\n */\nexport enum StorageClass {\n  /**\n   * ```xml\n   * Default class.\n   * ```\n   */\n  STANDARD = \"STANDARD\",\n  ONEZONE_IA = \"ONEZONE_IA\",\n  \"x-amz-glacier\" = \"GLACIER\",\n}"
        ));
        assert!(enums.contains("export const storageClassSchema = z.enum(StorageClass);"));
        assert!(enums.contains("import { z } from \"zod/v4\";"));
    }

    #[test]
    fn test_enum_values_drive_schema() {
        let model = SmithyParser::from_json(
            r#"{
                "smithy": "2.0",
                "shapes": {
                    "com.amazonaws.s3#Empty": { "type": "enum", "members": {} }
                }
            }"#,
        )
        .unwrap()
        .into_model();
        let config = CodegenConfig::default();
        let mut ctx = CodeGenContext::new(&model, &config);
        ctx.discover().unwrap();
        generate(&mut ctx, &entries_of(&model, ShapeKind::Enum)).unwrap();

        let tera = crate::templates::load_templates().unwrap();
        let files = ctx.render_files(&tera).unwrap();
        assert!(files[&FileKey::primary(SubFile::Enums)].contains("export enum Empty {}"));

        let mut renderer = Renderer::new();
        let schema = Schema::Enum {
            type_name: "Empty".to_string(),
            values: vec![],
        };
        let modules = ctx.modules();
        assert_eq!(
            renderer.render(&schema.lower(&FileKey::primary(SubFile::Enums), &modules)),
            "z.enum(Empty)"
        );
    }
}
