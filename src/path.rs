//! Dotted-path parsing and read-only resolution.
//!
//! A path is a `.`-separated list of segments. Each segment is a map key or, when the
//! node being walked is a list, a base-10 index. One leading dot is tolerated (`.a.b`
//! equals `a.b`); every other empty segment is rejected. There is no escape syntax, so
//! a key that itself contains a `.` cannot be addressed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConfigError, Result};
use crate::value::Value;

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Split a dotted path into its segments.
///
/// `""` and `"."`-prefixed paths are fine; `"a..b"`, `"a."` and `".."` are not.
pub fn split_path(path: &str) -> Result<Vec<&str>> {
    let mut segments: Vec<&str> = path.split('.').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(segments)
}

/// Resolve `path` against `root`.
///
/// # Examples
/// ```
/// use dotted_cfg::{path, Config, Value};
///
/// let cfg = Config::from_json(r#"{"a": {"b": [10, 20, 30]}}"#).unwrap();
/// cfg.with_value(|root| {
///     let node = path::resolve(root, "a.b.1").unwrap();
///     assert_eq!(node, &Value::Number(20.0));
/// })
/// .unwrap();
/// ```
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value> {
    let segments = split_path(path)?;
    resolve_segments(root, &segments)
}

/// Walk already-split segments from `root`.
pub fn resolve_segments<'a, S: AsRef<str>>(root: &'a Value, segments: &[S]) -> Result<&'a Value> {
    let mut current = root;
    for (pos, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        let next = match current {
            Value::List(items) => list_index(segment, items.len()).map(|i| &items[i]),
            Value::Map(map) => map.get(segment),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        };
        current = next.ok_or_else(|| not_found(segments, pos))?;
    }
    Ok(current)
}

/// Mutable twin of [`resolve_segments`], used to reach the node a handle points at.
pub(crate) fn resolve_segments_mut<'a, S: AsRef<str>>(
    root: &'a mut Value,
    segments: &[S],
) -> Result<&'a mut Value> {
    let mut current = root;
    for (pos, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        let node = current;
        let next = match node {
            Value::List(items) => match list_index(segment, items.len()) {
                Some(i) => items.get_mut(i),
                None => None,
            },
            Value::Map(map) => map.get_mut(segment),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        };
        current = next.ok_or_else(|| not_found(segments, pos))?;
    }
    Ok(current)
}

/// Index a list segment addresses, if it is a plain non-negative integer below `len`.
pub(crate) fn list_index(segment: &str, len: usize) -> Option<usize> {
    if !INDEX_SEGMENT.is_match(segment) {
        return None;
    }
    segment.parse::<usize>().ok().filter(|&i| i < len)
}

/// Build the `NotFound` error for a walk that stopped at `pos`.
pub(crate) fn not_found<S: AsRef<str>>(segments: &[S], pos: usize) -> ConfigError {
    ConfigError::NotFound {
        path: join(segments),
        found: join(&segments[..pos]),
        missing: join(&segments[pos..]),
    }
}

pub(crate) fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(".")
}
