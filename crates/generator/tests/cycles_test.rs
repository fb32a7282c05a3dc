//! Integration tests for recursive and mutually recursive shapes

use serde_json::json;
use smithy_zod_gen_generator::{generate_schemas, FileKey, GeneratedModel, SubFile};
use smithy_zod_gen_parser::SmithyParser;

fn generate(json: &str) -> GeneratedModel {
    let model = SmithyParser::from_json(json).unwrap().into_model();
    generate_schemas(model).unwrap()
}

fn structures(generated: &GeneratedModel) -> &str {
    generated
        .file(&FileKey::primary(SubFile::Structures))
        .expect("structures file")
}

#[test]
fn test_mutually_recursive_structures_use_lazy() {
    let generated = generate(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.amazonaws.s3#A": {
                    "type": "structure",
                    "members": { "B": { "target": "com.amazonaws.s3#B" } }
                },
                "com.amazonaws.s3#B": {
                    "type": "structure",
                    "members": { "A": { "target": "com.amazonaws.s3#A" } }
                }
            }
        }"#,
    );
    let text = structures(&generated);

    assert!(text.contains("export const aSchema = z.object({\n  B: z.lazy(() => bSchema).optional(),\n});"));
    assert!(text.contains("export const bSchema = z.object({\n  A: z.lazy(() => aSchema).optional(),\n});"));
    assert!(!text.contains("UNRESOLVED"));
}

#[test]
fn test_self_reference_through_member_and_list() {
    let generated = generate(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.amazonaws.s3#Node": {
                    "type": "structure",
                    "members": {
                        "Parent": { "target": "com.amazonaws.s3#Node" },
                        "Children": { "target": "com.amazonaws.s3#NodeList" }
                    }
                },
                "com.amazonaws.s3#NodeList": {
                    "type": "list",
                    "member": { "target": "com.amazonaws.s3#Node" }
                }
            }
        }"#,
    );
    let text = structures(&generated);

    assert!(text.contains("  Parent: z.lazy(() => nodeSchema).optional(),\n"));
    assert!(text.contains("  Children: z.array(z.lazy(() => nodeSchema)).optional(),\n"));

    let nested = json!({ "Parent": { "Parent": {} }, "Children": [{ "Children": [] }] });
    assert!(generated
        .validate("com.amazonaws.s3#Node", &nested)
        .unwrap()
        .is_valid());

    let invalid = json!({ "Parent": { "Children": [1] } });
    let validation = generated.validate("com.amazonaws.s3#Node", &invalid).unwrap();
    assert_eq!(validation.issues().len(), 1);
    assert_eq!(validation.issues()[0].path_string(), "Parent.Children.0");
}

#[test]
fn test_inline_cycle_is_cut_with_marker() {
    let generated = generate(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.amazonaws.s3#Holder": {
                    "type": "structure",
                    "members": { "Value": { "target": "com.amazonaws.s3#Nested" } }
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
                }
            }
        }"#,
    );
    let text = structures(&generated);

    assert!(text.contains(
        "  Value: z.array(z.union([/* UNRESOLVED: union member target com.amazonaws.s3#Nested for Choice.Again is a recursive reference. */ z.unknown(), z.string()])).optional(),\n"
    ));
}

#[test]
fn test_cross_file_cycle_imports_both_ways() {
    let generated = generate(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.amazonaws.s3#Grant": {
                    "type": "structure",
                    "members": { "Owner": { "target": "com.amazonaws.shared#Owner" } }
                },
                "com.amazonaws.shared#Owner": {
                    "type": "structure",
                    "members": { "Grant": { "target": "com.amazonaws.s3#Grant" } }
                }
            }
        }"#,
    );

    let primary = structures(&generated);
    assert!(primary.contains("import { ownerSchema } from \"./com.amazonaws.shared.structures.js\";"));
    assert!(primary.contains("  Owner: ownerSchema.optional(),\n"));

    let shared = generated
        .file(&FileKey::shared("com.amazonaws.shared", SubFile::Structures))
        .unwrap();
    assert!(shared.contains("import { grantSchema } from \"./structures.js\";"));
    assert!(shared.contains("  Grant: grantSchema.optional(),\n"));
}

#[test]
fn test_same_named_shapes_from_two_namespaces() {
    let generated = generate(
        r#"{
            "smithy": "2.0",
            "shapes": {
                "com.amazonaws.s3#Holder": {
                    "type": "structure",
                    "members": {
                        "Local": { "target": "com.amazonaws.s3#Tag" },
                        "Shared": { "target": "com.amazonaws.shared#Tag" }
                    }
                },
                "com.amazonaws.s3#Tag": {
                    "type": "structure",
                    "members": { "Key": { "target": "smithy.api#String" } }
                },
                "com.amazonaws.shared#Tag": {
                    "type": "structure",
                    "members": { "Value": { "target": "smithy.api#String" } }
                }
            }
        }"#,
    );
    let text = structures(&generated);

    assert!(text.contains(
        "import { tagSchema as sharedTagSchema } from \"./com.amazonaws.shared.structures.js\";"
    ));
    assert!(!text.contains("import { tagSchema }"));
    assert!(text.contains("export const tagSchema = z.object({"));
    assert!(text.contains(
        "export const holderSchema = z.object({\n  Local: z.lazy(() => tagSchema).optional(),\n  Shared: sharedTagSchema.optional(),\n});"
    ));

    let valid = generated
        .validate(
            "com.amazonaws.s3#Holder",
            &json!({ "Local": { "Key": "k" }, "Shared": { "Value": "v" } }),
        )
        .unwrap();
    assert!(valid.is_valid());
}
