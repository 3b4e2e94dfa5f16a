//! Early-stop policies: per-field truncation (`first_fields`) and global
//! collapse (`first`), separately and composed.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use trellis_schema::prelude::*;

fn erroring(message: &str) -> Rule {
    let message = message.to_string();
    Rule::new().with_validator(from_fn(move |_cx| Ok(Verdict::error(message.clone()))))
}

fn slow_erroring(delay_ms: u64, message: &str) -> Rule {
    let message = message.to_string();
    Rule::new().with_validator(deferred_fn(move |_cx| {
        let message = message.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok(Verdict::error(message))
        }
    }))
}

/// Three fields whose rule chains produce e1,e2 / e3 / e4,e5.
fn three_fields() -> Descriptor {
    Descriptor::new()
        .field("v", [erroring("e1"), erroring("e2")])
        .field("w", [erroring("e3")])
        .field("x", [erroring("e4"), erroring("e5")])
}

fn source() -> Map<String, Value> {
    json!({"v": 1, "w": 2, "x": 3})
        .as_object()
        .expect("object")
        .clone()
}

async fn messages_with(descriptor: Descriptor, options: ValidateOptions) -> Vec<String> {
    match Schema::new(descriptor)
        .validate_with_options(source(), &options)
        .await
    {
        Ok(_) => Vec::new(),
        Err(error) => error
            .into_invalid()
            .expect("ordinary failure")
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect(),
    }
}

#[tokio::test]
async fn first_fields_all_truncates_every_field() {
    let options = ValidateOptions {
        first_fields: FirstFields::All,
        ..ValidateOptions::default()
    };
    let messages = messages_with(three_fields(), options).await;
    assert_eq!(messages, ["e1", "e3", "e4"]);
}

#[tokio::test]
async fn first_fields_set_truncates_only_named_fields() {
    let options = ValidateOptions {
        first_fields: FirstFields::only(["v"]),
        ..ValidateOptions::default()
    };
    let messages = messages_with(three_fields(), options).await;
    assert_eq!(messages, ["e1", "e3", "e4", "e5"]);
}

#[tokio::test]
async fn first_collapses_to_the_earliest_declared_error() {
    let descriptor = Descriptor::new()
        .field("v", [erroring("e1"), erroring("e2")])
        .field("w", [erroring("e3")]);
    let options = ValidateOptions {
        first: true,
        ..ValidateOptions::default()
    };
    let messages = messages_with(descriptor, options).await;
    assert_eq!(messages, ["e1"]);
}

#[tokio::test]
async fn first_is_decided_by_declaration_not_completion() {
    // The earliest-declared failure is the slowest to settle.
    let descriptor = Descriptor::new()
        .rule("v", slow_erroring(40, "e1"))
        .rule("w", slow_erroring(1, "e2"));
    let options = ValidateOptions {
        first: true,
        ..ValidateOptions::default()
    };
    let messages = messages_with(descriptor, options).await;
    assert_eq!(messages, ["e1"]);
}

#[tokio::test]
async fn first_keeps_a_single_entry_field_map() {
    let options = ValidateOptions {
        first: true,
        ..ValidateOptions::default()
    };
    let rejection = Schema::new(three_fields())
        .validate_with_options(source(), &options)
        .await
        .expect_err("invalid source");
    let invalid = rejection.into_invalid().expect("ordinary failure");

    assert_eq!(invalid.errors.len(), 1);
    assert_eq!(invalid.fields.len(), 1);
    assert_eq!(invalid.fields.get("v").map(<[RuleError]>::len), Some(1));
}

#[tokio::test]
async fn first_composes_on_top_of_first_fields() {
    let options = ValidateOptions {
        first: true,
        first_fields: FirstFields::All,
        ..ValidateOptions::default()
    };
    let messages = messages_with(three_fields(), options).await;
    assert_eq!(messages, ["e1"]);
}

#[tokio::test]
async fn truncation_keeps_all_errors_of_the_failing_rule() {
    // Rule 0 passes, rule 1 fails with two errors: both are kept.
    let passing = Rule::new().with_validator(from_fn(|_cx| Ok(Verdict::Pass)));
    let double = Rule::new().with_validator(from_fn(|_cx| {
        Ok(Verdict::Errors(vec!["first".into(), "second".into()]))
    }));
    let descriptor = Descriptor::new().field("v", [passing, double, erroring("third")]);
    let options = ValidateOptions {
        first_fields: FirstFields::All,
        ..ValidateOptions::default()
    };
    let messages = messages_with(descriptor, options).await;
    assert_eq!(messages, ["first", "second"]);
}

#[tokio::test]
async fn clean_source_succeeds_under_every_policy() {
    let passing = || Rule::new().with_validator(from_fn(|_cx| Ok(Verdict::Pass)));
    for options in [
        ValidateOptions::default(),
        ValidateOptions {
            first: true,
            ..ValidateOptions::default()
        },
        ValidateOptions {
            first_fields: FirstFields::All,
            ..ValidateOptions::default()
        },
    ] {
        let descriptor = Descriptor::new().field("v", [passing(), passing()]);
        let resolved = Schema::new(descriptor)
            .validate_with_options(source(), &options)
            .await;
        assert!(resolved.is_ok(), "options: {options:?}");
    }
}
