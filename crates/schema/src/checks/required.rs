//! Presence predicates: the `required` check's notion of "missing" and the
//! whitespace guard.

use serde_json::Value;

use crate::validator::{Invocation, Verdict};

/// Whether a value counts as missing for the `required` check.
///
/// Missing is the `Null` sentinel (which also stands in for a field absent
/// from the source) or a zero-length sequence (string or array). Everything
/// else — `0`, `false`, `{}` — counts as present.
pub(crate) fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Rejects strings that contain only whitespace.
///
/// Empty strings are the required check's territory, so only non-empty
/// all-whitespace strings trip this guard.
pub(crate) fn whitespace(cx: &Invocation<'_>) -> Verdict {
    match cx.value.as_str() {
        Some(text) if !text.is_empty() && text.trim().is_empty() => {
            Verdict::error("{field} cannot be empty")
        }
        _ => Verdict::Pass,
    }
}

// ============================================================================
// TESTS
// ============================================================================
