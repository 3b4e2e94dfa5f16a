//! The two delivery channels — deferred result and callback — must carry
//! structurally identical outcomes.

use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use trellis_schema::prelude::*;

fn source(value: Value) -> Map<String, Value> {
    value.as_object().expect("test source is an object").clone()
}

fn schema() -> Schema {
    Schema::new(
        Descriptor::new()
            .rule("a", Rule::required())
            .field("b", [Rule::required(), Rule::required().with_message("still b")]),
    )
}

#[tokio::test]
async fn both_channels_deliver_the_same_failure() {
    let schema = schema();
    let input = json!({"b": ""});

    let deferred = schema
        .validate(source(input.clone()))
        .await
        .expect_err("invalid source")
        .into_invalid()
        .expect("ordinary failure");

    let mut via_callback = None;
    schema
        .validate_callback(source(input), &ValidateOptions::default(), |outcome| {
            via_callback = outcome;
        })
        .await
        .expect("no defect");

    assert_eq!(via_callback, Some(deferred));
}

#[tokio::test]
async fn callback_gets_none_on_success() {
    let schema = schema();
    let input = source(json!({"a": 1, "b": "x"}));

    let mut via_callback = Some(Invalid::default());
    let resolved = schema
        .validate_callback(input.clone(), &ValidateOptions::default(), |outcome| {
            via_callback = outcome;
        })
        .await
        .expect("no defect");

    assert_eq!(via_callback, None);
    assert_eq!(resolved, input);
}

#[tokio::test]
async fn callback_channel_honors_options() {
    let schema = schema();
    let options = ValidateOptions {
        first: true,
        ..ValidateOptions::default()
    };

    let mut via_callback = None;
    schema
        .validate_callback(source(json!({})), &options, |outcome| {
            via_callback = outcome;
        })
        .await
        .expect("no defect");

    let invalid = via_callback.expect("failure expected");
    assert_eq!(invalid.errors.len(), 1);
    assert_eq!(invalid.errors[0].field, "a");
}

#[tokio::test]
async fn defect_skips_the_callback_entirely() {
    let faulty = Rule::new().with_validator(from_fn(|_cx| Err(ValidatorFault::new("broken"))));
    let schema = Schema::new(Descriptor::new().rule("v", faulty));

    let mut invoked = false;
    let defect = schema
        .validate_callback(Map::new(), &ValidateOptions::default(), |_outcome| {
            invoked = true;
        })
        .await
        .expect_err("defect expected");

    assert!(!invoked);
    assert_eq!(defect.field, "v");
    assert_eq!(defect.fault.message(), "broken");
}

#[tokio::test]
async fn concurrent_calls_on_one_schema_do_not_interfere() {
    let schema = schema();
    let bad = schema.validate(source(json!({})));
    let good = schema.validate(source(json!({"a": 1, "b": "x"})));

    let (bad, good) = tokio::join!(bad, good);
    assert!(bad.is_err());
    assert!(good.is_ok());
}
