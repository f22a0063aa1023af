//! Field probing over untyped JSON
//!
//! The atomic primitive the rest of the engine composes from: given a record
//! and an ordered list of candidate fields, return the first usable string.

use serde_json::Value;

/// Key path into a JSON document, outermost key first
///
/// Paths are short and fixed (one to three keys), so walking one is bounded.
pub type FieldPath<'a> = &'a [&'a str];

/// Walk `path` from `value`, stopping at the first missing key or non-object
///
/// An empty path returns `value` itself.
pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Trimmed contents of a string value, if it has any
pub fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// First non-blank string among `keys`, checked in order on `record`
///
/// Values of any other JSON type are skipped, as are strings that are empty
/// after trimming. Absence is a normal result.
pub fn probe(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(non_blank))
        .map(str::to_string)
}

/// Same policy as [`probe`], for candidates that may be nested
pub fn probe_paths(record: &Value, paths: &[FieldPath]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(non_blank))
        .map(str::to_string)
}

/// [`probe_paths`] over several scopes, exhausting each scope before the next
pub fn probe_scopes(scopes: &[&Value], paths: &[FieldPath]) -> Option<String> {
    scopes.iter().find_map(|scope| probe_paths(scope, paths))
}
