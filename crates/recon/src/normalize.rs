//! Raw CMS records → `VersionRecord` / `AuthorProfile`.
//!
//! The provider returns two record shapes: flat (`{ id, documentId, title, ... }`) and
//! attributes-nested (`{ id, attributes: { documentId, title, ... } }`). Each shape gets
//! its own field lookup; everything downstream sees only the canonical types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::error::ReconError;
use crate::model::{AuthorProfile, PostRef, Source, VersionRecord};
use crate::source::{json_kind, list_items};

// ---------------------------------------------------------------------------
// Record shapes
// ---------------------------------------------------------------------------

trait RecordFields {
    fn field(&self, key: &str) -> Option<&Value>;
}

/// Payload carried directly on the record.
struct FlatRecord<'a>(&'a Map<String, Value>);

impl RecordFields for FlatRecord<'_> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }
}

/// Payload under `attributes`; the outer object wins for keys it carries (usually `id`).
struct NestedRecord<'a> {
    outer: &'a Map<String, Value>,
    attributes: &'a Map<String, Value>,
}

impl RecordFields for NestedRecord<'_> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.outer
            .get(key)
            .filter(|v| !v.is_null())
            .or_else(|| self.attributes.get(key).filter(|v| !v.is_null()))
    }
}

fn with_shape<T>(
    item: &Value,
    what: &str,
    index: usize,
    parse: impl FnOnce(&dyn RecordFields) -> Result<T, ReconError>,
) -> Result<T, ReconError> {
    let Value::Object(outer) = item else {
        return Err(ReconError::MalformedRecord {
            source: what.into(),
            index,
            reason: format!("expected an object, found {}", json_kind(item)),
        });
    };
    match outer.get("attributes") {
        Some(Value::Object(attributes)) => parse(&NestedRecord { outer, attributes }),
        _ => parse(&FlatRecord(outer)),
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn text(fields: &dyn RecordFields, key: &str) -> String {
    match fields.field(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn numeric_id(fields: &dyn RecordFields) -> Option<u64> {
    match fields.field("id")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// `documentId` if present, else `id` stringified.
fn logical_id(fields: &dyn RecordFields) -> Option<String> {
    let as_key = |v: &Value| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    fields
        .field("documentId")
        .and_then(as_key)
        .or_else(|| fields.field("id").and_then(as_key))
}

/// Raw ISO text of a timestamp field. Missing, null and empty all mean "never".
fn timestamp_text<'a>(fields: &'a dyn RecordFields, key: &str) -> Option<&'a str> {
    match fields.field(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Parse a CMS timestamp: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A timestamp field as an instant. Missing, null and empty mean "never"; a value that
/// does not parse is logged and also treated as "never" so the record survives.
fn timestamp(
    fields: &dyn RecordFields,
    key: &str,
    source: &str,
    index: usize,
) -> Option<DateTime<Utc>> {
    let value = match fields.field(key)? {
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => {
            if let Some(parsed) = parse_timestamp(s) {
                return Some(parsed);
            }
            s.clone()
        }
        other => other.to_string(),
    };
    let e = ReconError::TimestampParse {
        source: source.into(),
        index,
        field: key.into(),
        value,
    };
    log::warn!("{e}; treating it as unset");
    None
}

// ---------------------------------------------------------------------------
// Version records
// ---------------------------------------------------------------------------

fn parse_record(item: &Value, source: Source, index: usize) -> Result<VersionRecord, ReconError> {
    let label = source.to_string();
    with_shape(item, &label, index, |fields| {
        let logical_id = logical_id(fields).ok_or_else(|| ReconError::MalformedRecord {
            source: label.clone(),
            index,
            reason: "missing documentId and id".into(),
        })?;

        Ok(VersionRecord {
            id: numeric_id(fields),
            logical_id,
            title: text(fields, "title"),
            slug: text(fields, "slug"),
            content: text(fields, "content"),
            excerpt: text(fields, "excerpt"),
            published_at: timestamp(fields, "publishedAt", &label, index),
            updated_at: timestamp(fields, "updatedAt", &label, index),
            source,
        })
    })
}

/// Normalize one source set. Malformed entries are logged and skipped; only a
/// non-list input fails.
pub fn normalize_records(raw: &Value, source: Source) -> Result<Vec<VersionRecord>, ReconError> {
    let items = list_items(raw, source.argument_name())?;
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match parse_record(item, source, index) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("skipping record: {e}"),
        }
    }

    log::debug!(
        "normalized {} of {} {source} records",
        records.len(),
        items.len()
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// Author profiles
// ---------------------------------------------------------------------------

fn parse_post_ref(item: &Value, index: usize) -> Result<PostRef, ReconError> {
    with_shape(item, "blog_posts", index, |fields| {
        let logical_id = logical_id(fields).ok_or_else(|| ReconError::MalformedRecord {
            source: "blog_posts".into(),
            index,
            reason: "missing documentId and id".into(),
        })?;
        Ok(PostRef {
            id: numeric_id(fields),
            logical_id,
            title: text(fields, "title"),
            slug: text(fields, "slug"),
            excerpt: text(fields, "excerpt"),
            published_at: timestamp_text(fields, "publishedAt").map(str::to_string),
        })
    })
}

fn parse_author(item: &Value, index: usize) -> Result<AuthorProfile, ReconError> {
    with_shape(item, "author", index, |fields| {
        let logical_id = logical_id(fields).ok_or_else(|| ReconError::MalformedRecord {
            source: "author".into(),
            index,
            reason: "missing documentId and id".into(),
        })?;

        // Relations come back either as a bare array or wrapped in `{ data: [...] }`.
        let relation = fields.field("blog_posts").map(|raw| list_items(raw, "blog_posts"));
        let posts: &[Value] = match relation {
            Some(Ok(items)) => items,
            Some(Err(e)) => {
                log::warn!("author '{logical_id}': ignoring blog_posts: {e}");
                &[]
            }
            None => &[],
        };

        let mut blog_posts = Vec::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            match parse_post_ref(post, i) {
                Ok(p) => blog_posts.push(p),
                Err(e) => log::warn!("author '{logical_id}': skipping post: {e}"),
            }
        }

        Ok(AuthorProfile {
            name: text(fields, "name"),
            logical_id,
            blog_posts,
        })
    })
}

/// Normalize an authors list response. Malformed authors are logged and skipped.
pub fn normalize_authors(raw: &Value) -> Result<Vec<AuthorProfile>, ReconError> {
    let items = list_items(raw, "authors")?;
    let mut authors = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match parse_author(item, index) {
            Ok(a) => authors.push(a),
            Err(e) => log::warn!("skipping author: {e}"),
        }
    }
    Ok(authors)
}
