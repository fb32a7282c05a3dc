//! Canonical timestamp behavior as seen by generated code

use smithy_zod_gen_runtime::timestamp::{
    is_http_date, normalize_date_time, DATE_TIME_SCHEMA, HTTP_DATE_SCHEMA,
};
use smithy_zod_gen_runtime::RuntimeError;

#[test]
fn test_date_time_examples() {
    let cases = [
        ("1985-04-12T23:20:50Z", "1985-04-12T23:20:50.000Z"),
        ("1985-04-12T23:20:50+01:00", "1985-04-12T22:20:50.000Z"),
        ("1985-04-12T23:20:50-02:30", "1985-04-13T01:50:50.000Z"),
        ("1985-04-12T23:20:50.123456Z", "1985-04-12T23:20:50.123Z"),
        ("1999-12-31T23:59:59.9999999-00:01", "2000-01-01T00:00:59.999Z"),
    ];

    for (input, expected) in cases {
        assert_eq!(
            normalize_date_time(input).unwrap(),
            expected,
            "normalizing {}",
            input
        );
    }
}

#[test]
fn test_invalid_date_time_reports_value() {
    let err = normalize_date_time("yesterday").unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidDateTime(ref v) if v == "yesterday"));
}

#[test]
fn test_http_date_examples() {
    assert!(is_http_date("Tue, 29 Apr 2014 18:30:38 GMT"));
    assert!(!is_http_date("Tue, 29 Apr 2014 18:30:38.5 GMT"));
    assert!(!is_http_date("Tue, 29 Apr 2014 18:30:38 PST"));
}

#[test]
fn test_exported_binding_names() {
    assert_eq!(DATE_TIME_SCHEMA, "rfc3339DateTimeTimestampSchema");
    assert_eq!(HTTP_DATE_SCHEMA, "imfFixdateTimestampSchema");
}
