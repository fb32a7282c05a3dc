//! Integration tests for validating JSON values with generated schemas

use serde_json::json;
use smithy_zod_gen_generator::{generate_schemas, GeneratedModel, Validation};
use smithy_zod_gen_parser::SmithyParser;
use smithy_zod_gen_runtime::IssueCode;

const MODEL: &str = r#"{
    "smithy": "2.0",
    "shapes": {
        "com.amazonaws.s3#PutObjectRequest": {
            "type": "structure",
            "members": {
                "Key": {
                    "target": "com.amazonaws.s3#ObjectKey",
                    "traits": { "smithy.api#required": {} }
                },
                "Tags": { "target": "com.amazonaws.s3#TagSet" },
                "Body": {
                    "target": "smithy.api#Blob",
                    "traits": { "smithy.api#default": "AQID" }
                },
                "Empty": {
                    "target": "smithy.api#Blob",
                    "traits": { "smithy.api#default": "" }
                },
                "Mode": { "target": "com.amazonaws.s3#Mode" },
                "Created": { "target": "smithy.api#Timestamp" },
                "Expires": {
                    "target": "smithy.api#Timestamp",
                    "traits": { "smithy.api#timestampFormat": "http-date" }
                },
                "Parts": {
                    "target": "smithy.api#Integer",
                    "traits": { "smithy.api#range": { "min": 1, "max": 10000 } }
                }
            }
        },
        "com.amazonaws.s3#ObjectKey": {
            "type": "string",
            "traits": { "smithy.api#length": { "min": 1, "max": 255 } }
        },
        "com.amazonaws.s3#TagSet": {
            "type": "list",
            "member": { "target": "smithy.api#String" },
            "traits": { "smithy.api#uniqueItems": {} }
        },
        "com.amazonaws.s3#Mode": {
            "type": "enum",
            "members": {
                "GOVERNANCE": {
                    "target": "smithy.api#Unit",
                    "traits": { "smithy.api#enumValue": "GOVERNANCE" }
                },
                "COMPLIANCE": {
                    "target": "smithy.api#Unit",
                    "traits": { "smithy.api#enumValue": "COMPLIANCE" }
                }
            }
        }
    }
}"#;

const REQUEST: &str = "com.amazonaws.s3#PutObjectRequest";

fn generated() -> GeneratedModel {
    let model = SmithyParser::from_json(MODEL).unwrap().into_model();
    generate_schemas(model).unwrap()
}

fn parsed(validation: Validation) -> serde_json::Value {
    match validation {
        Validation::Valid(value) => value,
        Validation::Invalid(issues) => panic!("unexpected issues: {:?}", issues),
    }
}

#[test]
fn test_optional_members_may_be_absent() {
    let value = parsed(generated().validate(REQUEST, &json!({ "Key": "a" })).unwrap());
    assert_eq!(value["Key"], "a");
    assert!(value.get("Tags").is_none());
    assert!(value.get("Created").is_none());
}

#[test]
fn test_required_member_missing() {
    let validation = generated().validate(REQUEST, &json!({})).unwrap();
    let issues = validation.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::InvalidType);
    assert_eq!(issues[0].path_string(), "Key");
}

#[test]
fn test_string_length_bounds() {
    let model = generated();
    assert!(!model.validate(REQUEST, &json!({ "Key": "" })).unwrap().is_valid());
    assert!(model.validate(REQUEST, &json!({ "Key": "k".repeat(255) })).unwrap().is_valid());

    let too_long = model
        .validate(REQUEST, &json!({ "Key": "k".repeat(256) }))
        .unwrap();
    assert_eq!(too_long.issues()[0].code, IssueCode::TooBig);
}

#[test]
fn test_duplicate_items_reported_at_second_occurrence() {
    let validation = generated()
        .validate(REQUEST, &json!({ "Key": "a", "Tags": ["x", "y", "x"] }))
        .unwrap();
    let issues = validation.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path_string(), "Tags.2");
    assert_eq!(issues[0].message, "Duplicate items are not allowed.");

    assert!(generated()
        .validate(REQUEST, &json!({ "Key": "a", "Tags": ["x", "y"] }))
        .unwrap()
        .is_valid());
}

#[test]
fn test_blob_defaults_are_applied() {
    let value = parsed(generated().validate(REQUEST, &json!({ "Key": "a" })).unwrap());
    assert_eq!(value["Body"], json!([1, 2, 3]));
    assert_eq!(value["Empty"], json!([]));

    let explicit = parsed(
        generated()
            .validate(REQUEST, &json!({ "Key": "a", "Body": [9] }))
            .unwrap(),
    );
    assert_eq!(explicit["Body"], json!([9]));
}

#[test]
fn test_date_time_values_are_normalized() {
    let model = generated();
    let cases = [
        ("1985-04-12T23:20:50Z", "1985-04-12T23:20:50.000Z"),
        ("1985-04-12T23:20:50+01:00", "1985-04-12T22:20:50.000Z"),
        ("1985-04-12T23:20:50.123456Z", "1985-04-12T23:20:50.123Z"),
    ];
    for (input, expected) in cases {
        let value = parsed(
            model
                .validate(REQUEST, &json!({ "Key": "a", "Created": input }))
                .unwrap(),
        );
        assert_eq!(value["Created"], expected, "input {}", input);
    }

    let invalid = model
        .validate(REQUEST, &json!({ "Key": "a", "Created": "yesterday" }))
        .unwrap();
    assert_eq!(invalid.issues()[0].code, IssueCode::InvalidFormat);
}

#[test]
fn test_http_dates() {
    let model = generated();
    assert!(model
        .validate(
            REQUEST,
            &json!({ "Key": "a", "Expires": "Tue, 29 Apr 2014 18:30:38 GMT" })
        )
        .unwrap()
        .is_valid());
    assert!(!model
        .validate(REQUEST, &json!({ "Key": "a", "Expires": "2014-04-29T18:30:38Z" }))
        .unwrap()
        .is_valid());
}

#[test]
fn test_enum_and_range_members() {
    let model = generated();
    assert!(model
        .validate(REQUEST, &json!({ "Key": "a", "Mode": "COMPLIANCE", "Parts": 3 }))
        .unwrap()
        .is_valid());

    let bad_mode = model
        .validate(REQUEST, &json!({ "Key": "a", "Mode": "compliance" }))
        .unwrap();
    assert_eq!(bad_mode.issues()[0].code, IssueCode::InvalidValue);

    let bad_parts = model
        .validate(REQUEST, &json!({ "Key": "a", "Parts": 0 }))
        .unwrap();
    assert_eq!(bad_parts.issues()[0].code, IssueCode::TooSmall);
    assert_eq!(bad_parts.issues()[0].path_string(), "Parts");
}

#[test]
fn test_unknown_keys_are_stripped() {
    let value = parsed(
        generated()
            .validate(REQUEST, &json!({ "Key": "a", "Extra": true }))
            .unwrap(),
    );
    assert!(value.get("Extra").is_none());
}
