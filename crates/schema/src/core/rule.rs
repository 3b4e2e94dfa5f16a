//! Rule declarations.
//!
//! A [`Rule`] is one constraint attached to a field: required-ness, a value
//! kind with its constraints, or a custom validator. Rules are built
//! fluently and stored in a `Descriptor` in declaration order.
//!
//! # Examples
//!
//! ```rust,ignore
//! use trellis_schema::core::{Kind, Rule};
//!
//! let username = Rule::of(Kind::String).with_min(3.0).with_max(20.0);
//! let email = Rule::of(Kind::Email);
//! let accepted = Rule::required().with_message("you must accept the terms");
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::validator::Validator;

// ============================================================================
// KIND
// ============================================================================

/// The value kind a rule expects, dispatched to a built-in checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A number without a fractional representation.
    Integer,
    /// A number with a fractional representation.
    Float,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// One of the rule's enumerated `choices`.
    Enum,
    /// An RFC 3339 timestamp or `YYYY-MM-DD` date string.
    Date,
    /// An absolute URL.
    Url,
    /// An email address.
    Email,
    /// A hexadecimal string, with or without a `0x` prefix.
    Hex,
    /// A string matching the rule's `pattern`.
    Pattern,
}

impl Kind {
    /// Lower-case name used in kind-mismatch messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::Date => "date",
            Self::Url => "url",
            Self::Email => "email",
            Self::Hex => "hex",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RULE
// ============================================================================

/// One constraint attached to a field.
///
/// A rule may combine a `required` flag, a custom validator, and a [`Kind`]
/// with kind-specific constraints; which parts actually run is the rule
/// runner's concern. An explicit message (including the empty string)
/// replaces the default templates.
#[derive(Clone, Default)]
pub struct Rule {
    pub(crate) required: bool,
    pub(crate) whitespace: bool,
    pub(crate) message: Option<String>,
    pub(crate) kind: Option<Kind>,
    pub(crate) len: Option<usize>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) choices: Vec<Value>,
    pub(crate) validator: Option<Arc<dyn Validator>>,
}

impl Rule {
    /// Creates an empty rule. An empty rule never produces errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule that requires the field to be present and non-empty.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Creates a rule expecting the given value [`Kind`].
    #[must_use]
    pub fn of(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Sets or clears the `required` flag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Rejects strings that consist entirely of whitespace.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_whitespace(mut self) -> Self {
        self.whitespace = true;
        self
    }

    /// Sets an explicit message for this rule's errors.
    ///
    /// An explicit empty string is honored as-is; it is not the same as
    /// leaving the message unset.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches a custom validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Sets the lower bound: character count for strings, element count for
    /// arrays, magnitude for numbers.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound (same measure as [`Rule::with_min`]).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires an exact length; supersedes `min`/`max` when present.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    /// Sets the pattern used by [`Kind::Pattern`] and the pattern constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the allowed values for [`Kind::Enum`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Value>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    /// Whether the `required` flag is set.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The explicit message, if one was set.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The expected value kind, if one was set.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// The custom validator, if one was attached.
    #[must_use]
    pub fn validator(&self) -> Option<&Arc<dyn Validator>> {
        self.validator.as_ref()
    }

    /// Whether this rule carries anything for the built-in checkers: a kind,
    /// a bound, a pattern, choices, or the whitespace flag.
    #[must_use]
    pub fn has_checks(&self) -> bool {
        self.kind.is_some()
            || self.len.is_some()
            || self.min.is_some()
            || self.max.is_some()
            || self.pattern.is_some()
            || !self.choices.is_empty()
            || self.whitespace
    }
}

// Manual impl: the validator trait object has no Debug.
impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("whitespace", &self.whitespace)
            .field("message", &self.message)
            .field("kind", &self.kind)
            .field("len", &self.len)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("choices", &self.choices)
            .field(
                "validator",
                &self.validator.as_ref().map(|_| "<validator>"),
            )
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rule_has_no_checks() {
        let rule = Rule::new();
        assert!(!rule.is_required());
        assert!(!rule.has_checks());
        assert!(rule.message().is_none());
    }

    #[test]
    fn required_constructor_sets_flag() {
        assert!(Rule::required().is_required());
    }

    #[test]
    fn explicit_empty_message_is_distinct_from_absent() {
        let absent = Rule::required();
        let empty = Rule::required().with_message("");
        assert_eq!(absent.message(), None);
        assert_eq!(empty.message(), Some(""));
    }

    #[test]
    fn kind_rule_reports_checks() {
        assert!(Rule::of(Kind::String).has_checks());
        assert!(Rule::new().with_min(1.0).has_checks());
        assert!(Rule::new().with_whitespace().has_checks());
    }

    #[test]
    fn debug_does_not_require_validator_debug() {
        let rule = Rule::new().with_validator(crate::validator::from_fn(|_cx| {
            Ok(crate::validator::Verdict::Pass)
        }));
        let rendered = format!("{rule:?}");
        assert!(rendered.contains("<validator>"));
    }
}
