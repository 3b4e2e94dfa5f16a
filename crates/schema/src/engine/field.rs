//! Field runner: evaluates one field's rule list.

use futures::future::join_all;
use serde_json::{Map, Value};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::error::{Defect, RuleError};
use crate::core::options::ValidateOptions;
use crate::core::rule::Rule;
use crate::messages::MessageResolver;

use super::rule::run_rule;

/// Runs every rule of one field concurrently and reassembles the results in
/// rule declaration order.
///
/// Results are collected into one slot per rule; completion order never
/// influences the output. When the per-field early-stop policy applies,
/// only the first failing rule's slot survives — truncation is per-rule,
/// so a failing rule keeps all of its own errors.
///
/// A defect (earliest by rule order) wins over any collected errors, but
/// only after every rule has settled — in-flight checks are never aborted.
pub(crate) async fn run_field(
    field: &str,
    rules: &[Rule],
    value: &Value,
    source: &Map<String, Value>,
    options: &ValidateOptions,
    messages: &dyn MessageResolver,
) -> Result<Vec<RuleError>, Defect> {
    trace!(field, rules = rules.len(), "running field");

    let slots = join_all(
        rules
            .iter()
            .map(|rule| run_rule(field, rule, value, source, options, messages)),
    )
    .await;

    let mut collected = Vec::with_capacity(slots.len());
    for slot in slots {
        collected.push(slot?);
    }

    if options.first_fields.applies_to(field) {
        let first_failing = collected.into_iter().find(|slot| !slot.is_empty());
        return Ok(first_failing.map(SmallVec::into_vec).unwrap_or_default());
    }
    Ok(collected.into_iter().flatten().collect())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::FirstFields;
    use crate::messages::DefaultMessages;
    use crate::validator::{from_fn, Verdict};
    use serde_json::json;

    fn failing(messages: &[&str]) -> Rule {
        let owned: Vec<String> = messages.iter().map(ToString::to_string).collect();
        Rule::new().with_validator(from_fn(move |_cx| Ok(Verdict::Errors(owned.clone()))))
    }

    fn passing() -> Rule {
        Rule::new().with_validator(from_fn(|_cx| Ok(Verdict::Pass)))
    }

    async fn run(rules: &[Rule], options: &ValidateOptions) -> Vec<RuleError> {
        let source = Map::new();
        run_field("v", rules, &json!(1), &source, options, &DefaultMessages)
            .await
            .expect("no defect")
    }

    #[tokio::test]
    async fn all_rule_errors_concatenate_in_order() {
        let rules = [failing(&["e1"]), passing(), failing(&["e2", "e3"])];
        let errors = run(&rules, &ValidateOptions::default()).await;
        let rendered: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(rendered, ["e1", "e2", "e3"]);
    }

    #[tokio::test]
    async fn first_fields_keeps_whole_slot_of_first_failing_rule() {
        let rules = [passing(), failing(&["e1", "e2"]), failing(&["e3"])];
        let options = ValidateOptions {
            first_fields: FirstFields::All,
            ..ValidateOptions::default()
        };
        let errors = run(&rules, &options).await;
        let rendered: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(rendered, ["e1", "e2"]);
    }

    #[tokio::test]
    async fn first_fields_ignores_unlisted_fields() {
        let rules = [failing(&["e1"]), failing(&["e2"])];
        let options = ValidateOptions {
            first_fields: FirstFields::only(["other"]),
            ..ValidateOptions::default()
        };
        let errors = run(&rules, &options).await;
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn clean_field_yields_nothing() {
        let errors = run(&[passing(), passing()], &ValidateOptions::default()).await;
        assert!(errors.is_empty());
    }
}
