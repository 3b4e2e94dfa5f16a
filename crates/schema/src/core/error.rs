//! Failure data produced by validation.
//!
//! Every rule that is not satisfied yields a [`RuleError`]; a failed
//! `validate` call carries the flat, declaration-ordered error list plus a
//! per-field grouping ([`FieldErrors`]) inside [`Invalid`]. A validator that
//! fails *on its own* (as opposed to rejecting the value) surfaces as a
//! [`ValidatorFault`] / [`Defect`] instead — that distinction is the backbone
//! of the error taxonomy here.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// RULE ERROR
// ============================================================================

/// The uniform failure record produced when a rule is not satisfied.
///
/// # Examples
///
/// ```rust,ignore
/// use trellis_schema::core::RuleError;
///
/// let error = RuleError::new("email", "email is required");
/// assert_eq!(error.field, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleError {
    /// Name of the field the failing rule belongs to.
    pub field: String,

    /// Human-readable message, already resolved (templates interpolated).
    pub message: String,

    /// The field's value as observed by the check that produced this error.
    ///
    /// `None` means "no value recorded": errors normalized from validator
    /// verdicts never carry the value, because the verdict channel has no
    /// out-of-band slot for it. Only engine-side checks (such as `required`)
    /// record the observed value.
    pub field_value: Option<Value>,
}

impl RuleError {
    /// Creates an error with no recorded value.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            field_value: None,
        }
    }

    /// Records the observed field value on this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: Value) -> Self {
        self.field_value = Some(value);
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

// ============================================================================
// FIELD ERRORS MAP
// ============================================================================

/// Rule errors grouped by field name, in field declaration order.
///
/// Within one field the errors keep rule declaration order; fields that
/// produced no errors are not present at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    groups: IndexMap<String, Vec<RuleError>>,
}

impl FieldErrors {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the errors recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[RuleError]> {
        self.groups.get(field).map(Vec::as_slice)
    }

    /// Returns true if `field` has at least one error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.groups.contains_key(field)
    }

    /// Number of fields with errors (not the total error count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over `(field, errors)` groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleError])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of errors across all fields.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub(crate) fn push_group(&mut self, field: &str, errors: impl IntoIterator<Item = RuleError>) {
        self.groups
            .entry(field.to_string())
            .or_default()
            .extend(errors);
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a Vec<RuleError>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<RuleError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

// ============================================================================
// INVALID
// ============================================================================

/// The failure payload of a `validate` call: the flat error list in
/// declaration order plus the same errors grouped per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Invalid {
    /// All errors, ordered by (field declaration, rule declaration).
    pub errors: Vec<RuleError>,
    /// The same errors grouped by field.
    pub fields: FieldErrors,
}

impl Invalid {
    pub(crate) fn from_groups(groups: Vec<(String, Vec<RuleError>)>) -> Self {
        let mut errors = Vec::new();
        let mut fields = FieldErrors::new();
        for (field, group) in groups {
            if group.is_empty() {
                continue;
            }
            fields.push_group(&field, group.iter().cloned());
            errors.extend(group);
        }
        Self { errors, fields }
    }

    /// Collapses the payload to its single earliest-declared error.
    pub(crate) fn into_first(self) -> Self {
        let mut errors = self.errors;
        errors.truncate(1);
        let mut fields = FieldErrors::new();
        if let Some(error) = errors.first() {
            fields.push_group(&error.field, [error.clone()]);
        }
        Self { errors, fields }
    }
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATOR FAULTS
// ============================================================================

/// A validator failing on its own — a bug or an unavailable backend, not a
/// verdict about the value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidatorFault {
    message: String,
}

impl ValidatorFault {
    /// Creates a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates a fault from any error value.
    pub fn from_error(error: &(impl std::error::Error + ?Sized)) -> Self {
        Self::new(error.to_string())
    }

    /// The fault's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A [`ValidatorFault`] attributed to the field whose rule raised it.
///
/// A defect aborts the whole `validate` call (unless suppression is enabled);
/// it is a call-level failure, never a [`RuleError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validator for field `{field}` failed: {fault}")]
pub struct Defect {
    /// The field whose rule's validator faulted.
    pub field: String,
    /// The underlying fault.
    #[source]
    pub fault: ValidatorFault,
}

// ============================================================================
// VALIDATE ERROR
// ============================================================================

/// Rejection of a `validate` call, through either delivery channel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidateError {
    /// One or more rules were not satisfied.
    #[error("{0}")]
    Invalid(Invalid),

    /// A validator faulted and `suppress_validator_error` was not set;
    /// already-collected rule errors are discarded.
    #[error(transparent)]
    Defect(#[from] Defect),
}

impl ValidateError {
    /// The ordered error list, when this is an ordinary validation failure.
    #[must_use]
    pub fn errors(&self) -> Option<&[RuleError]> {
        match self {
            Self::Invalid(invalid) => Some(&invalid.errors),
            Self::Defect(_) => None,
        }
    }

    /// The per-field error map, when this is an ordinary validation failure.
    #[must_use]
    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(invalid) => Some(&invalid.fields),
            Self::Defect(_) => None,
        }
    }

    /// Extracts the failure payload, when this is an ordinary validation
    /// failure.
    pub fn into_invalid(self) -> Result<Invalid, Self> {
        match self {
            Self::Invalid(invalid) => Ok(invalid),
            defect @ Self::Defect(_) => Err(defect),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_error_records_no_value_by_default() {
        let error = RuleError::new("name", "name is required");
        assert_eq!(error.field_value, None);
    }

    #[test]
    fn rule_error_with_value() {
        let error = RuleError::new("age", "too young").with_value(json!(12));
        assert_eq!(error.field_value, Some(json!(12)));
    }

    #[test]
    fn field_errors_keep_group_order() {
        let mut fields = FieldErrors::new();
        fields.push_group("b", [RuleError::new("b", "first")]);
        fields.push_group("a", [RuleError::new("a", "second")]);

        let order: Vec<&str> = fields.iter().map(|(field, _)| field).collect();
        assert_eq!(order, ["b", "a"]);
        assert_eq!(fields.total(), 2);
    }

    #[test]
    fn invalid_from_groups_skips_clean_fields() {
        let invalid = Invalid::from_groups(vec![
            ("a".into(), vec![]),
            ("b".into(), vec![RuleError::new("b", "bad")]),
        ]);

        assert_eq!(invalid.errors.len(), 1);
        assert!(!invalid.fields.contains("a"));
        assert!(invalid.fields.contains("b"));
    }

    #[test]
    fn invalid_into_first_keeps_earliest() {
        let invalid = Invalid::from_groups(vec![
            ("a".into(), vec![RuleError::new("a", "e1"), RuleError::new("a", "e2")]),
            ("b".into(), vec![RuleError::new("b", "e3")]),
        ])
        .into_first();

        assert_eq!(invalid.errors.len(), 1);
        assert_eq!(invalid.errors[0].message, "e1");
        assert_eq!(invalid.fields.len(), 1);
    }

    #[test]
    fn defect_display_names_the_field() {
        let defect = Defect {
            field: "email".into(),
            fault: ValidatorFault::new("backend unavailable"),
        };
        let rendered = defect.to_string();
        assert!(rendered.contains("email"));
        assert!(rendered.contains("backend unavailable"));
    }

    #[test]
    fn validate_error_accessors() {
        let invalid = Invalid::from_groups(vec![("a".into(), vec![RuleError::new("a", "bad")])]);
        let error = ValidateError::Invalid(invalid);
        assert_eq!(error.errors().map(<[RuleError]>::len), Some(1));

        let defect = ValidateError::from(Defect {
            field: "a".into(),
            fault: ValidatorFault::new("boom"),
        });
        assert!(defect.errors().is_none());
    }
}
