//! Range and length constraints (`min` / `max` / `len`).
//!
//! The measure depends on the value's shape: character count for strings,
//! element count for arrays, magnitude for numbers. Values with no sensible
//! measure (booleans, objects, null) are left to the kind checks.

use serde_json::Value;

use crate::validator::{Invocation, Verdict};

enum Measure {
    Length(f64),
    Magnitude(f64),
}

fn measure(value: &Value) -> Option<Measure> {
    match value {
        Value::String(text) => Some(Measure::Length(text.chars().count() as f64)),
        Value::Array(items) => Some(Measure::Length(items.len() as f64)),
        Value::Number(number) => number.as_f64().map(Measure::Magnitude),
        _ => None,
    }
}

pub(crate) fn check(cx: &Invocation<'_>) -> Verdict {
    let Some(measured) = measure(cx.value) else {
        return Verdict::Pass;
    };
    let (actual, unit) = match measured {
        Measure::Length(n) => (n, " in length"),
        Measure::Magnitude(n) => (n, ""),
    };

    // An exact length bound supersedes min/max.
    if let Some(len) = cx.rule.len {
        if (actual - len as f64).abs() > f64::EPSILON {
            return Verdict::error(format!("{{field}} must be exactly {len}{unit}"));
        }
        return Verdict::Pass;
    }

    match (cx.rule.min, cx.rule.max) {
        (Some(min), Some(max)) if actual < min || actual > max => Verdict::error(format!(
            "{{field}} must be between {min} and {max}{unit}"
        )),
        (Some(min), None) if actual < min => {
            Verdict::error(format!("{{field}} must be at least {min}{unit}"))
        }
        (None, Some(max)) if actual > max => {
            Verdict::error(format!("{{field}} must be at most {max}{unit}"))
        }
        _ => Verdict::Pass,
    }
}

// ============================================================================
// TESTS
// ============================================================================
