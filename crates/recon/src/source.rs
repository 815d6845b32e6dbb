//! Unwrapping of CMS list responses.
//!
//! The content API wraps collections as `{ "data": [...], "meta": { "pagination": { ... } } }`.
//! Exports and tests sometimes carry the bare array instead; both are accepted.

use serde_json::Value;

use crate::error::ReconError;

/// Decode an exported list response.
pub fn parse_response(text: &str) -> Result<Value, ReconError> {
    Ok(serde_json::from_str(text)?)
}

/// Return the list of items in a list response. Fails when `raw` is neither an
/// array nor an object whose `data` is an array.
pub fn list_items<'a>(raw: &'a Value, argument: &str) -> Result<&'a [Value], ReconError> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(ReconError::NotAList {
                argument: format!("{argument}.data"),
                found: json_kind(other).into(),
            }),
            None => Err(ReconError::NotAList {
                argument: argument.into(),
                found: "object without 'data'".into(),
            }),
        },
        other => Err(ReconError::NotAList {
            argument: argument.into(),
            found: json_kind(other).into(),
        }),
    }
}

/// Platform-wide total from `meta.pagination.total`; 0 when absent.
pub fn pagination_total(raw: &Value) -> u64 {
    raw.pointer("/meta/pagination/total")
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or(0)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
