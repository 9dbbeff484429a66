//! Helpers for indexing into untyped JSON responses.
//!
//! The server wraps every payload as `{"data": ...}` but the client does not
//! validate a schema. Callers walk the parsed body with [`lookup`], which turns
//! an absent key into [`ClientError::MissingField`].

use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Follows `path` through nested objects (or arrays, for numeric segments).
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> ClientResult<&'a Value> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        let next = match current {
            Value::Object(map) => map.get(*key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        current = next.ok_or_else(|| ClientError::MissingField(path[..=depth].join(".")))?;
    }
    Ok(current)
}

/// The `data` payload of a response.
pub fn data(value: &Value) -> ClientResult<&Value> {
    lookup(value, &["data"])
}

/// A string at `path`.
pub fn lookup_str<'a>(value: &'a Value, path: &[&str]) -> ClientResult<&'a str> {
    lookup(value, path)?
        .as_str()
        .ok_or_else(|| ClientError::MissingField(path.join(".")))
}

/// Length of the array at `path`.
pub fn lookup_len(value: &Value, path: &[&str]) -> ClientResult<usize> {
    lookup(value, path)?
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| ClientError::MissingField(path.join(".")))
}
