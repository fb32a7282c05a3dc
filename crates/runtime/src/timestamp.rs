//! Canonical timestamp formats
//!
//! Smithy timestamps travel as strings in one of two canonical formats:
//!
//! - `date-time`: RFC3339 with an optional fraction and a `Z` or `±hh:mm`
//!   offset. Accepted values are normalized to UTC with exactly three
//!   fractional digits. Extra fractional digits are truncated, not rounded.
//! - `http-date`: IMF-fixdate (`Tue, 29 Apr 2014 18:30:38 GMT`). Values are
//!   accepted only when they round-trip through the canonical formatter, so
//!   fractional seconds, other zones and wrong weekdays are rejected.

use crate::{Result, RuntimeError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const RFC3339_DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})$";

pub const IMF_FIXDATE_PATTERN: &str = r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun), \d{2} (Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{4} \d{2}:\d{2}:\d{2} GMT$";

const FRACTION_TRUNCATION_PATTERN: &str = r"\.(\d{3})\d+(Z|[+-]\d{2}:\d{2})$";

const IMF_FIXDATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Binding exported by the runtime package for `date-time` timestamps
pub const DATE_TIME_SCHEMA: &str = "rfc3339DateTimeTimestampSchema";

/// Binding exported by the runtime package for `http-date` timestamps
pub const HTTP_DATE_SCHEMA: &str = "imfFixdateTimestampSchema";

type CachedRegex = OnceLock<std::result::Result<Regex, regex::Error>>;

fn compiled<'a>(cell: &'a CachedRegex, pattern: &str) -> Result<&'a Regex> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| RuntimeError::Pattern(e.to_string()))
}

/// Normalize an RFC3339 `date-time` value to `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn normalize_date_time(value: &str) -> Result<String> {
    static DATE_TIME: CachedRegex = OnceLock::new();
    static FRACTION: CachedRegex = OnceLock::new();

    let invalid = || RuntimeError::InvalidDateTime(value.to_string());

    if !compiled(&DATE_TIME, RFC3339_DATE_TIME_PATTERN)?.is_match(value) {
        return Err(invalid());
    }

    let truncated = compiled(&FRACTION, FRACTION_TRUNCATION_PATTERN)?.replace(value, ".${1}${2}");
    let parsed = DateTime::parse_from_rfc3339(&truncated).map_err(|_| invalid())?;

    // chrono represents a leap second as an overflowing fraction
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }

    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Whether `value` is an acceptable `date-time` timestamp
pub fn is_date_time(value: &str) -> bool {
    normalize_date_time(value).is_ok()
}

/// Validate an IMF-fixdate `http-date` value
pub fn validate_http_date(value: &str) -> Result<()> {
    static FIXDATE: CachedRegex = OnceLock::new();

    let invalid = || RuntimeError::InvalidHttpDate(value.to_string());

    if !compiled(&FIXDATE, IMF_FIXDATE_PATTERN)?.is_match(value) {
        return Err(invalid());
    }

    let parsed = NaiveDateTime::parse_from_str(value, IMF_FIXDATE_FORMAT).map_err(|_| invalid())?;
    if parsed.format(IMF_FIXDATE_FORMAT).to_string() != value {
        return Err(invalid());
    }

    Ok(())
}

/// Whether `value` is an acceptable `http-date` timestamp
pub fn is_http_date(value: &str) -> bool {
    validate_http_date(value).is_ok()
}
