//! Container resolution: "try shape A, else shape B, else shape C"
//!
//! Sources disagree on where lists and sub-records live. Resolution walks the
//! candidate paths strictly in order and stops at the first one that yields a
//! non-empty container. Candidates are never merged: a present but empty list
//! does not preempt a later candidate, and a later candidate is never consulted
//! once an earlier one produced data.

use crate::probe::{lookup, FieldPath};
use serde_json::Value;

/// Envelope some sources wrap the whole process in
pub const PROCESS_ENVELOPE: &[FieldPath] = &[&["processo"]];

/// First candidate resolving to a non-empty array, or an empty slice
pub fn resolve_list<'v>(record: &'v Value, candidates: &[FieldPath]) -> &'v [Value] {
    candidates
        .iter()
        .find_map(|path| {
            lookup(record, path)
                .and_then(Value::as_array)
                .filter(|items| !items.is_empty())
        })
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First candidate resolving to a non-empty object
///
/// The returned value is always a `Value::Object`.
pub fn resolve_record<'v>(record: &'v Value, candidates: &[FieldPath]) -> Option<&'v Value> {
    candidates.iter().find_map(|path| {
        lookup(record, path).filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
    })
}

/// Every element of every candidate list, in candidate order
///
/// Unlike [`resolve_list`] this is a union: all candidates contribute and
/// repeated entries are kept.
pub fn gather_lists<'v>(record: &'v Value, candidates: &[FieldPath]) -> Vec<&'v Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(record, path).and_then(Value::as_array))
        .flatten()
        .collect()
}

/// The enclosing process sub-record: the `processo` envelope, else the root
pub fn process_scope(source: &Value) -> &Value {
    resolve_record(source, PROCESS_ENVELOPE).unwrap_or(source)
}
