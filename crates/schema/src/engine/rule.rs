//! Rule runner: evaluates one rule against one field's value.

use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::checks;
use crate::core::error::{Defect, RuleError};
use crate::core::options::ValidateOptions;
use crate::core::rule::Rule;
use crate::messages::{templates, MessageResolver};
use crate::validator::{self, Invocation, Verdict};

/// Per-rule error buffer; the common case is zero or one error.
pub(crate) type RuleErrors = SmallVec<[RuleError; 1]>;

/// Runs one rule: the built-in `required` check, then the custom validator
/// (or, failing both, the built-in checks the rule declares).
///
/// The required check and the custom validator are independent — a
/// required-failure does not suppress the validator; their errors are
/// merged, required first.
pub(crate) async fn run_rule(
    field: &str,
    rule: &Rule,
    value: &Value,
    source: &Map<String, Value>,
    options: &ValidateOptions,
    messages: &dyn MessageResolver,
) -> Result<RuleErrors, Defect> {
    let mut errors = RuleErrors::new();

    if rule.is_required() && checks::required::is_missing(value) {
        let template = rule.message().unwrap_or(templates::REQUIRED);
        errors.push(
            RuleError::new(field, messages.resolve(template, field)).with_value(value.clone()),
        );
    }

    let cx = Invocation {
        rule,
        field,
        value,
        source,
        options,
    };

    if let Some(custom) = rule.validator() {
        match validator::settle(custom.as_ref(), &cx).await {
            Ok(verdict) => collect(&mut errors, verdict, &cx, messages),
            Err(fault) if options.suppress_validator_error => {
                errors.push(RuleError::new(field, fault.message()));
            }
            Err(fault) => {
                return Err(Defect {
                    field: field.to_string(),
                    fault,
                });
            }
        }
    } else if !rule.is_required() && rule.has_checks() {
        collect(&mut errors, checks::run(&cx), &cx, messages);
    }

    Ok(errors)
}

/// Normalizes a settled verdict into rule errors.
///
/// Verdict-path errors never record the field value — that channel has no
/// slot for it, and the asymmetry with the engine-side checks is part of
/// the contract.
fn collect(
    errors: &mut RuleErrors,
    verdict: Verdict,
    cx: &Invocation<'_>,
    messages: &dyn MessageResolver,
) {
    match verdict {
        Verdict::Pass => {}
        Verdict::Fail => {
            let template = cx.rule.message().unwrap_or(templates::FAILS);
            errors.push(RuleError::new(
                cx.field,
                messages.resolve(template, cx.field),
            ));
        }
        Verdict::Errors(list) => {
            for message in list {
                errors.push(RuleError::new(
                    cx.field,
                    messages.resolve(&message, cx.field),
                ));
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
