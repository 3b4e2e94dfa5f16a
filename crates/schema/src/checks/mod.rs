//! Built-in checks.
//!
//! Each check is an ordinary function of the invocation context returning a
//! settled [`Verdict`]; kind checks are resolved through a static registry
//! keyed by [`Kind`](crate::core::Kind). The dispatcher composes whatever
//! the rule declares: the kind check, the range/length constraints, the
//! pattern constraint, and the whitespace guard.
//!
//! Missing values pass every check here — required-ness is the `required`
//! flag's concern, so an optional field that was simply left out never
//! trips a kind or range check.

pub(crate) mod kinds;
pub(crate) mod range;
pub(crate) mod required;

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::core::rule::Kind;
use crate::validator::{Invocation, Verdict};

/// A built-in check: settled, synchronous, message templates still carrying
/// the `{field}` placeholder.
pub(crate) type Check = fn(&Invocation<'_>) -> Verdict;

static REGISTRY: LazyLock<HashMap<Kind, Check>> = LazyLock::new(|| {
    let mut registry: HashMap<Kind, Check> = HashMap::new();
    registry.insert(Kind::String, kinds::string);
    registry.insert(Kind::Number, kinds::number);
    registry.insert(Kind::Integer, kinds::integer);
    registry.insert(Kind::Float, kinds::float);
    registry.insert(Kind::Boolean, kinds::boolean);
    registry.insert(Kind::Array, kinds::array);
    registry.insert(Kind::Object, kinds::object);
    registry.insert(Kind::Enum, kinds::enumeration);
    registry.insert(Kind::Date, kinds::date);
    registry.insert(Kind::Url, kinds::url);
    registry.insert(Kind::Email, kinds::email);
    registry.insert(Kind::Hex, kinds::hex);
    registry.insert(Kind::Pattern, kinds::pattern);
    registry
});

fn pass(_cx: &Invocation<'_>) -> Verdict {
    Verdict::Pass
}

/// Resolves the check registered for `kind`.
pub(crate) fn resolve(kind: Kind) -> Check {
    REGISTRY.get(&kind).copied().unwrap_or(pass)
}

/// Runs every built-in check the rule declares and merges their messages.
///
/// An explicit rule message replaces whatever the built-ins produced, as a
/// single error.
pub(crate) fn run(cx: &Invocation<'_>) -> Verdict {
    if required::is_missing(cx.value) {
        return Verdict::Pass;
    }

    let mut messages = Vec::new();
    if let Some(kind) = cx.rule.kind() {
        extend(&mut messages, resolve(kind)(cx));
    }
    if cx.rule.len.is_some() || cx.rule.min.is_some() || cx.rule.max.is_some() {
        extend(&mut messages, range::check(cx));
    }
    if cx.rule.pattern.is_some() && cx.rule.kind() != Some(Kind::Pattern) {
        extend(&mut messages, kinds::pattern(cx));
    }
    if cx.rule.whitespace {
        extend(&mut messages, required::whitespace(cx));
    }

    if messages.is_empty() {
        return Verdict::Pass;
    }
    match cx.rule.message() {
        Some(message) => Verdict::error(message),
        None => Verdict::Errors(messages),
    }
}

fn extend(messages: &mut Vec<String>, verdict: Verdict) {
    match verdict {
        Verdict::Pass | Verdict::Fail => {}
        Verdict::Errors(more) => messages.extend(more),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::ValidateOptions;
    use crate::core::rule::Rule;
    use serde_json::{json, Map, Value};

    fn run_rule_against(rule: &Rule, value: &Value) -> Verdict {
        let source = Map::new();
        let options = ValidateOptions::default();
        let cx = Invocation {
            rule,
            field: "v",
            value,
            source: &source,
            options: &options,
        };
        run(&cx)
    }

    #[test]
    fn missing_values_pass_all_checks() {
        let rule = Rule::of(Kind::Email).with_min(3.0);
        assert_eq!(run_rule_against(&rule, &Value::Null), Verdict::Pass);
        assert_eq!(run_rule_against(&rule, &json!("")), Verdict::Pass);
    }

    #[test]
    fn kind_and_range_messages_merge() {
        let rule = Rule::of(Kind::String).with_min(10.0);
        let verdict = run_rule_against(&rule, &json!(7));
        match verdict {
            Verdict::Errors(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected errors, got {other:?}"),
        }
    }

    #[test]
    fn explicit_message_replaces_builtin_messages() {
        let rule = Rule::of(Kind::String).with_min(5.0).with_message("bad value");
        let verdict = run_rule_against(&rule, &json!(7));
        assert_eq!(verdict, Verdict::error("bad value"));
    }

    #[test]
    fn pattern_constraint_composes_with_string_kind() {
        let rule = Rule::of(Kind::String)
            .with_pattern(regex::Regex::new(r"^\d+$").expect("static pattern"));
        let verdict = run_rule_against(&rule, &json!("abc"));
        match verdict {
            Verdict::Errors(messages) => {
                assert_eq!(messages.len(), 1);
                assert!(messages[0].contains("pattern"));
            }
            other => panic!("expected errors, got {other:?}"),
        }
    }

    #[test]
    fn pattern_kind_does_not_double_report() {
        let rule = Rule::of(Kind::Pattern)
            .with_pattern(regex::Regex::new(r"^\d+$").expect("static pattern"));
        let verdict = run_rule_against(&rule, &json!("abc"));
        match verdict {
            Verdict::Errors(messages) => assert_eq!(messages.len(), 1),
            other => panic!("expected errors, got {other:?}"),
        }
    }

    #[test]
    fn passing_value_produces_pass() {
        let rule = Rule::of(Kind::String).with_min(2.0).with_max(5.0);
        assert_eq!(run_rule_against(&rule, &json!("abc")), Verdict::Pass);
    }
}
