//! Field access shared by the record types.
//!
//! Records are kept as the JSON the backend sent so that writing one back
//! never drops a field the client does not know about.

use sonic_rs::{JsonValueTrait, Value};

/// A string field, treating empty strings as absent.
pub(crate) fn text<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

/// A string field or `""`.
pub(crate) fn text_or_empty<'a>(raw: &'a Value, key: &str) -> &'a str {
    text(raw, key).unwrap_or("")
}

pub(crate) fn unsigned(raw: &Value, key: &str) -> Option<u64> {
    raw.get(key).and_then(|v| v.as_u64())
}

pub(crate) fn flag(raw: &Value, key: &str) -> Option<bool> {
    raw.get(key).and_then(|v| v.as_bool())
}

/// The record id. Ids are strings on the wire, but numeric ids are tolerated.
pub(crate) fn id(raw: &Value) -> Option<String> {
    let field = raw.get("id")?;
    if let Some(s) = field.as_str() {
        return (!s.is_empty()).then(|| s.to_string());
    }
    field.as_u64().map(|n| n.to_string())
}

/// Parses a backend timestamp. Accepts RFC 3339 and zone-less ISO local
/// date-times (read as UTC).
pub(crate) fn timestamp(raw: &Value, key: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = text(raw, key)?;
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
