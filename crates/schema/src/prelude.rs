//! Prelude module for convenient imports.
//!
//! Provides a single `use trellis_schema::prelude::*;` import that brings
//! in the schema facade, the rule and option types, the failure shapes, and
//! the validator contract.
//!
//! # Examples
//!
//! ```rust,ignore
//! use trellis_schema::prelude::*;
//!
//! let schema = Schema::new(
//!     Descriptor::new()
//!         .rule("name", Rule::required())
//!         .rule("email", Rule::of(Kind::Email)),
//! );
//! ```

// ============================================================================
// FACADE
// ============================================================================

pub use crate::schema::{Descriptor, Schema};

// ============================================================================
// CORE: rules, options, failure shapes
// ============================================================================

pub use crate::core::{
    Defect, FieldErrors, FirstFields, Invalid, Kind, Rule, RuleError, ValidateError,
    ValidateOptions, ValidatorFault,
};

// ============================================================================
// VALIDATOR CONTRACT
// ============================================================================

pub use crate::validator::{
    deferred_fn, from_fn, Done, Invocation, Validator, ValidatorOutcome, Verdict,
};

// ============================================================================
// MESSAGES
// ============================================================================

pub use crate::messages::{DefaultMessages, MessageResolver};
