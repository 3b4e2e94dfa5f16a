//! Kind checks: one per [`Kind`](crate::core::Kind) variant.
//!
//! Every check returns message templates still carrying the `{field}`
//! placeholder; resolution happens when the rule runner builds the errors.

use std::sync::LazyLock;

use serde_json::Value;

use crate::validator::{Invocation, Verdict};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("static email pattern compiles")
});

static HEX_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(0[xX])?[0-9a-fA-F]+$").expect("static hex pattern compiles")
});

fn mismatch(kind: &str) -> Verdict {
    Verdict::error(format!("{{field}} is not a {kind}"))
}

fn invalid(kind: &str) -> Verdict {
    Verdict::error(format!("{{field}} is not a valid {kind}"))
}

pub(crate) fn string(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_string() {
        Verdict::Pass
    } else {
        mismatch("string")
    }
}

pub(crate) fn number(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_number() {
        Verdict::Pass
    } else {
        mismatch("number")
    }
}

pub(crate) fn integer(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_i64() || cx.value.is_u64() {
        Verdict::Pass
    } else {
        mismatch("integer")
    }
}

// A number carries a fractional representation exactly when it does not fit
// the integer encodings.
pub(crate) fn float(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_f64() {
        Verdict::Pass
    } else {
        mismatch("float")
    }
}

pub(crate) fn boolean(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_boolean() {
        Verdict::Pass
    } else {
        mismatch("boolean")
    }
}

pub(crate) fn array(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_array() {
        Verdict::Pass
    } else {
        mismatch("array")
    }
}

pub(crate) fn object(cx: &Invocation<'_>) -> Verdict {
    if cx.value.is_object() {
        Verdict::Pass
    } else {
        mismatch("object")
    }
}

pub(crate) fn enumeration(cx: &Invocation<'_>) -> Verdict {
    if cx.rule.choices.is_empty() || cx.rule.choices.contains(cx.value) {
        return Verdict::Pass;
    }
    let listed: Vec<String> = cx.rule.choices.iter().map(Value::to_string).collect();
    Verdict::error(format!("{{field}} must be one of [{}]", listed.join(", ")))
}

pub(crate) fn date(cx: &Invocation<'_>) -> Verdict {
    let Some(text) = cx.value.as_str() else {
        return invalid("date");
    };
    let parses = chrono::DateTime::parse_from_rfc3339(text).is_ok()
        || chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok();
    if parses { Verdict::Pass } else { invalid("date") }
}

pub(crate) fn url(cx: &Invocation<'_>) -> Verdict {
    match cx.value.as_str() {
        Some(text) if url::Url::parse(text).is_ok() => Verdict::Pass,
        _ => invalid("url"),
    }
}

pub(crate) fn email(cx: &Invocation<'_>) -> Verdict {
    match cx.value.as_str() {
        Some(text) if EMAIL_REGEX.is_match(text) => Verdict::Pass,
        _ => invalid("email"),
    }
}

pub(crate) fn hex(cx: &Invocation<'_>) -> Verdict {
    match cx.value.as_str() {
        Some(text) if HEX_REGEX.is_match(text) => Verdict::Pass,
        _ => invalid("hex"),
    }
}

pub(crate) fn pattern(cx: &Invocation<'_>) -> Verdict {
    // A pattern rule without a pattern has nothing to check.
    let Some(pattern) = cx.rule.pattern.as_ref() else {
        return Verdict::Pass;
    };
    match cx.value.as_str() {
        Some(text) if pattern.is_match(text) => Verdict::Pass,
        _ => Verdict::error(format!(
            "{{field}} does not match pattern {}",
            pattern.as_str()
        )),
    }
}

// ============================================================================
// TESTS
// ============================================================================
