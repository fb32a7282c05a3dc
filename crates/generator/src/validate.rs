//! Schema evaluation
//!
//! Interprets a [`Schema`] against a JSON value with the semantics of the
//! emitted validators: optional members may be absent, defaults fill absent
//! members, refinements report bounds, `date-time` values come back
//! normalized, unknown object keys are stripped. Byte arrays are JSON arrays
//! of integers in `0..=255`; 64-bit integers are any JSON integer.

use crate::schema::{anchored, Check, DefaultValue, Schema};
use regex::Regex;
use serde_json::{Map, Value};
use smithy_zod_gen_runtime::issue::{
    check_max_length, check_max_value, check_min_length, check_min_value, check_unique_items,
};
use smithy_zod_gen_runtime::{timestamp, Issue, IssueCode, PathSegment, WideInt};
use std::collections::BTreeMap;

/// Result of validating a value
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// The parsed value, with defaults applied and timestamps normalized
    Valid(Value),
    Invalid(Vec<Issue>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Invalid(issues) => issues,
        }
    }
}

type Outcome = std::result::Result<Option<Value>, Vec<Issue>>;

/// Evaluates schemas whose references point into `schemas`
pub struct Evaluator<'a> {
    schemas: &'a BTreeMap<String, Schema>,
}

impl<'a> Evaluator<'a> {
    pub fn new(schemas: &'a BTreeMap<String, Schema>) -> Self {
        Self { schemas }
    }

    pub fn validate(&self, schema: &Schema, value: &Value) -> Validation {
        match self.eval(schema, Some(value)) {
            Ok(parsed) => Validation::Valid(parsed.unwrap_or(Value::Null)),
            Err(issues) => Validation::Invalid(issues),
        }
    }

    fn eval(&self, schema: &Schema, value: Option<&Value>) -> Outcome {
        match schema {
            Schema::Optional(inner) => match value {
                None => Ok(None),
                Some(_) => self.eval(inner, value),
            },
            Schema::Default { inner, value: fallback } => match value {
                None => Ok(Some(default_json(fallback))),
                Some(_) => self.eval(inner, value),
            },
            Schema::Marked { inner, .. } | Schema::Lazy(inner) => self.eval(inner, value),
            Schema::Ref(reference) => match self.schemas.get(&reference.shape_id) {
                Some(target) => self.eval(target, value),
                None => Err(vec![Issue::new(
                    IssueCode::Custom,
                    format!("No schema generated for {}", reference.shape_id),
                )]),
            },
            Schema::Unknown => Ok(value.cloned()),
            Schema::Refine { inner, check } => {
                let parsed = self.eval(inner, value)?;
                match parsed.as_ref().and_then(|v| refinement_issue(v, *check)) {
                    Some(issue) => Err(vec![issue]),
                    None => Ok(parsed),
                }
            }
            _ => match value {
                None => Err(vec![Issue::new(
                    IssueCode::InvalidType,
                    format!("Invalid input: expected {}, received undefined", expected(schema)),
                )]),
                Some(value) => self.eval_present(schema, value).map(Some),
            },
        }
    }

    fn eval_present(&self, schema: &Schema, value: &Value) -> std::result::Result<Value, Vec<Issue>> {
        let mismatch = || {
            vec![Issue::new(
                IssueCode::InvalidType,
                format!("Invalid input: expected {}, received {}", expected(schema), received(value)),
            )]
        };

        match schema {
            Schema::String {
                min_length,
                max_length,
                pattern,
            } => {
                let text = value.as_str().ok_or_else(mismatch)?;
                let length = text.encode_utf16().count();
                let mut issues: Vec<Issue> = [
                    min_length.and_then(|min| check_min_length(length, min)),
                    max_length.and_then(|max| check_max_length(length, max)),
                ]
                .into_iter()
                .flatten()
                .collect();
                if let Some(pattern) = pattern {
                    issues.extend(pattern_issue(text, pattern));
                }
                finish(value.clone(), issues)
            }
            Schema::Number { integer, min, max } => {
                let number = value.as_f64().ok_or_else(mismatch)?;
                if *integer && !is_safe_integer(value) {
                    return Err(vec![Issue::new(
                        IssueCode::InvalidType,
                        "Invalid input: expected int, received number",
                    )]);
                }
                let issues = [
                    min.and_then(|min| check_min_value(number, min)),
                    max.and_then(|max| check_max_value(number, max)),
                ]
                .into_iter()
                .flatten()
                .collect();
                finish(value.clone(), issues)
            }
            Schema::BigInt => WideInt::from_value(value)
                .map(|int| int.to_value())
                .ok_or_else(mismatch),
            Schema::Boolean => value.as_bool().map(Value::Bool).ok_or_else(mismatch),
            Schema::Bytes => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let is_byte = |item: &Value| item.as_u64().is_some_and(|b| b <= u64::from(u8::MAX));
                if items.iter().all(is_byte) {
                    Ok(value.clone())
                } else {
                    Err(mismatch())
                }
            }
            Schema::DateTime => {
                let text = value.as_str().ok_or_else(mismatch)?;
                timestamp::normalize_date_time(text)
                    .map(Value::String)
                    .map_err(|e| vec![Issue::new(IssueCode::InvalidFormat, e.to_string())])
            }
            Schema::HttpDate => {
                let text = value.as_str().ok_or_else(mismatch)?;
                timestamp::validate_http_date(text)
                    .map(|()| value.clone())
                    .map_err(|e| vec![Issue::new(IssueCode::InvalidFormat, e.to_string())])
            }
            Schema::EpochSeconds => value.as_f64().map(|_| value.clone()).ok_or_else(mismatch),
            Schema::Enum { values, .. } => {
                let text = value.as_str().ok_or_else(mismatch)?;
                if values.iter().any(|v| v == text) {
                    Ok(value.clone())
                } else {
                    Err(vec![Issue::new(
                        IssueCode::InvalidValue,
                        format!("Invalid option: expected one of {}", quoted_list(values)),
                    )])
                }
            }
            Schema::Array {
                item,
                min_length,
                max_length,
                unique_items,
            } => {
                let items = value.as_array().ok_or_else(mismatch)?;
                let mut parsed = Vec::with_capacity(items.len());
                let mut issues = Vec::new();
                for (index, element) in items.iter().enumerate() {
                    match self.eval(item, Some(element)) {
                        Ok(element) => parsed.push(element.unwrap_or(Value::Null)),
                        Err(nested) => issues.extend(
                            nested
                                .into_iter()
                                .map(|issue| issue.within(PathSegment::Index(index))),
                        ),
                    }
                }
                issues.extend(min_length.and_then(|min| check_min_length(items.len(), min)));
                issues.extend(max_length.and_then(|max| check_max_length(items.len(), max)));
                if issues.is_empty() && *unique_items {
                    issues.extend(check_unique_items(&parsed));
                }
                finish(Value::Array(parsed), issues)
            }
            Schema::Record { key, value: value_schema } => {
                let entries = value.as_object().ok_or_else(mismatch)?;
                let mut parsed = Map::new();
                let mut issues = Vec::new();
                for (name, entry) in entries {
                    let segment = || PathSegment::Key(name.clone());
                    if let Err(nested) = self.eval(key, Some(&Value::String(name.clone()))) {
                        issues.extend(nested.into_iter().map(|issue| issue.within(segment())));
                        continue;
                    }
                    match self.eval(value_schema, Some(entry)) {
                        Ok(Some(entry)) => {
                            parsed.insert(name.clone(), entry);
                        }
                        Ok(None) => {}
                        Err(nested) => {
                            issues.extend(nested.into_iter().map(|issue| issue.within(segment())))
                        }
                    }
                }
                finish(Value::Object(parsed), issues)
            }
            Schema::Union(members) => {
                if members.is_empty() {
                    return Err(mismatch());
                }
                let mut first_failure = None;
                for member in members {
                    match self.eval(member, Some(value)) {
                        Ok(parsed) => return Ok(parsed.unwrap_or(Value::Null)),
                        Err(issues) => {
                            first_failure.get_or_insert(issues);
                        }
                    }
                }
                Err(vec![Issue::new(
                    IssueCode::InvalidValue,
                    format!(
                        "Invalid input: no union member matched ({} issue(s) on the first)",
                        first_failure.map_or(0, |issues| issues.len())
                    ),
                )])
            }
            Schema::Object(fields) => {
                let entries = value.as_object().ok_or_else(mismatch)?;
                let mut parsed = Map::new();
                let mut issues = Vec::new();
                for field in fields {
                    match self.eval(&field.schema, entries.get(&field.name)) {
                        Ok(Some(entry)) => {
                            parsed.insert(field.name.clone(), entry);
                        }
                        Ok(None) => {}
                        Err(nested) => issues.extend(
                            nested
                                .into_iter()
                                .map(|issue| issue.within(PathSegment::Key(field.name.clone()))),
                        ),
                    }
                }
                finish(Value::Object(parsed), issues)
            }
            Schema::Optional(_)
            | Schema::Default { .. }
            | Schema::Marked { .. }
            | Schema::Lazy(_)
            | Schema::Ref(_)
            | Schema::Unknown
            | Schema::Refine { .. } => self.eval(schema, Some(value)).map(|v| v.unwrap_or(Value::Null)),
        }
    }
}

fn finish(parsed: Value, issues: Vec<Issue>) -> std::result::Result<Value, Vec<Issue>> {
    if issues.is_empty() {
        Ok(parsed)
    } else {
        Err(issues)
    }
}

/// JSON form of a default literal
pub fn default_json(value: &DefaultValue) -> Value {
    match value {
        DefaultValue::String(text) => Value::String(text.clone()),
        DefaultValue::Bool(flag) => Value::Bool(*flag),
        DefaultValue::Bytes(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
        DefaultValue::Json(json) => json.clone(),
    }
}

/// Member-level refinement against `.length` or a numeric value
fn refinement_issue(value: &Value, check: Check) -> Option<Issue> {
    let length = match value {
        Value::String(text) => Some(text.encode_utf16().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    };
    match check {
        Check::MinLength(min) => length.and_then(|len| check_min_length(len, min)),
        Check::MaxLength(max) => length.and_then(|len| check_max_length(len, max)),
        Check::MinValue(min) => value.as_f64().and_then(|n| check_min_value(n, min)),
        Check::MaxValue(max) => value.as_f64().and_then(|n| check_max_value(n, max)),
    }
}

fn pattern_issue(text: &str, pattern: &str) -> Option<Issue> {
    let anchored = anchored(pattern);
    match Regex::new(&anchored) {
        Ok(regex) if regex.is_match(text) => None,
        Ok(_) => Some(Issue::new(
            IssueCode::InvalidFormat,
            format!("Invalid string: must match pattern {}", anchored),
        )),
        Err(e) => Some(Issue::new(
            IssueCode::Custom,
            format!("Pattern {} cannot be evaluated: {}", pattern, e),
        )),
    }
}

fn is_safe_integer(value: &Value) -> bool {
    match WideInt::from_value(value) {
        Some(int) => int.is_safe(),
        None => value.as_f64().is_some_and(|n| n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_991.0),
    }
}

fn expected(schema: &Schema) -> &'static str {
    match schema {
        Schema::String { .. }
        | Schema::DateTime
        | Schema::HttpDate
        | Schema::Enum { .. } => "string",
        Schema::Number { .. } | Schema::EpochSeconds => "number",
        Schema::BigInt => "bigint",
        Schema::Boolean => "boolean",
        Schema::Bytes => "Uint8Array",
        Schema::Array { .. } => "array",
        Schema::Record { .. } | Schema::Object(_) => "object",
        _ => "value",
    }
}

fn received(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join("|")
}
