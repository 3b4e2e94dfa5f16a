//! # trellis-schema
//!
//! A declarative, schema-driven, asynchronous value-validation engine.
//!
//! A [`Schema`] owns a [`Descriptor`] — a mapping from field names to
//! ordered rule lists — and validates a source value set against it:
//! every applicable rule runs (concurrently where rules are independent),
//! failures are collected, and the result is reassembled in declaration
//! order regardless of how long individual validators took.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::{json, Map, Value};
//! use trellis_schema::prelude::*;
//!
//! let schema = Schema::new(
//!     Descriptor::new()
//!         .rule("name", Rule::required())
//!         .field("age", [Rule::of(Kind::Integer).with_min(0.0)]),
//! );
//!
//! let mut source = Map::new();
//! source.insert("age".into(), json!(-3));
//!
//! match schema.validate(source).await {
//!     Ok(source) => println!("valid: {source:?}"),
//!     Err(error) => eprintln!("{error}"),
//! }
//! ```
//!
//! ## Custom validators
//!
//! Rules accept custom checks through [`Rule::with_validator`]: synchronous
//! functions ([`validator::from_fn`]), future-returning functions
//! ([`validator::deferred_fn`]), or anything implementing
//! [`validator::Validator`] — including validators that keep their
//! [`validator::Done`] handle and settle it from another task.
//!
//! ## Early-stop policies
//!
//! [`core::ValidateOptions`] carries two composable knobs: `first`
//! collapses the whole result to the single earliest-declared error, and
//! `first_fields` truncates affected fields to their first failing rule.
//! Neither aborts in-flight checks — truncation happens at assembly time.

mod checks;
mod engine;
mod schema;

pub mod core;
pub mod messages;
pub mod prelude;
pub mod validator;

pub use crate::core::rule::Rule;
pub use crate::schema::{Descriptor, Schema};
