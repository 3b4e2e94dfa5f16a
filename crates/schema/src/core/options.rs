//! Per-call validation options.

use std::collections::HashSet;

// ============================================================================
// VALIDATE OPTIONS
// ============================================================================

/// Options for one `validate` call.
///
/// The two early-stop knobs compose: `first` collapses whatever the
/// per-field policy (`first_fields`) already produced.
///
/// # Examples
///
/// ```rust,ignore
/// use trellis_schema::core::{FirstFields, ValidateOptions};
///
/// let options = ValidateOptions {
///     first: true,
///     ..ValidateOptions::default()
/// };
/// let per_field = ValidateOptions {
///     first_fields: FirstFields::only(["email"]),
///     ..ValidateOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateOptions {
    /// Collapse the whole result to the single earliest-declared error.
    pub first: bool,

    /// Per-field early stop: keep only the first failing rule's errors for
    /// the affected fields.
    pub first_fields: FirstFields,

    /// Downgrade validator faults to ordinary rule errors instead of
    /// aborting the call.
    pub suppress_validator_error: bool,
}

impl ValidateOptions {
    /// Creates the default options (no early stop, faults abort).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// FIRST FIELDS
// ============================================================================

/// Which fields stop at their first failing rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FirstFields {
    /// No per-field early stop.
    #[default]
    Off,
    /// Every field stops at its first failing rule.
    All,
    /// Only the named fields stop at their first failing rule.
    Only(HashSet<String>),
}

impl FirstFields {
    /// Builds the explicit-set variant from any collection of names.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(fields.into_iter().map(Into::into).collect())
    }

    /// Whether the policy is active for `field`.
    #[must_use]
    pub fn applies_to(&self, field: &str) -> bool {
        match self {
            Self::Off => false,
            Self::All => true,
            Self::Only(fields) => fields.contains(field),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
