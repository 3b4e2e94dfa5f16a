//! The schema facade: a descriptor plus the two validation entry points.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::core::error::{Defect, Invalid, ValidateError};
use crate::core::options::ValidateOptions;
use crate::core::rule::Rule;
use crate::engine;
use crate::messages::{DefaultMessages, MessageResolver};

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Mapping from field name to its ordered rule list.
///
/// Insertion order is significant: it is the declaration order used for
/// result ordering and `first` tie-breaking. A descriptor is immutable once
/// handed to a [`Schema`]; changing the rules means building a new schema.
///
/// # Examples
///
/// ```rust,ignore
/// use trellis_schema::{Descriptor, Rule};
/// use trellis_schema::core::Kind;
///
/// let descriptor = Descriptor::new()
///     .rule("name", Rule::required())
///     .field("age", [Rule::required(), Rule::of(Kind::Integer)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    fields: IndexMap<String, Vec<Rule>>,
}

impl Descriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field with a single rule.
    ///
    /// Declaring the same field again appends to its rule list.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(self, name: impl Into<String>, rule: Rule) -> Self {
        self.field(name, [rule])
    }

    /// Declares a field with an ordered rule list.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.entry(name.into()).or_default().extend(rules);
        self
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The rules declared for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Rule]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Iterates over `(field, rules)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Rule>)> for Descriptor {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Rule>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |descriptor, (name, rules)| {
                descriptor.field(name, rules)
            })
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// A validation schema: the descriptor plus the message resolver.
///
/// A schema is stateless and reentrant — concurrent `validate` calls share
/// only the immutable descriptor; each call owns its result buffers.
#[derive(Clone)]
pub struct Schema {
    descriptor: Descriptor,
    messages: Arc<dyn MessageResolver>,
}

impl Schema {
    /// Creates a schema over a descriptor.
    ///
    /// The descriptor itself is not checked; malformed rules surface as
    /// errors only when exercised.
    #[must_use]
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            messages: Arc::new(DefaultMessages),
        }
    }

    /// Swaps the message resolver.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_messages(mut self, messages: impl MessageResolver + 'static) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    /// The descriptor this schema validates against.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Validates `source` with default options.
    ///
    /// Resolves with the untouched source on success; rejects with
    /// [`ValidateError::Invalid`] when rules fail, or
    /// [`ValidateError::Defect`] when a validator faults.
    pub async fn validate(
        &self,
        source: Map<String, Value>,
    ) -> Result<Map<String, Value>, ValidateError> {
        self.validate_with_options(source, &ValidateOptions::default())
            .await
    }

    /// Validates `source` with explicit options.
    pub async fn validate_with_options(
        &self,
        source: Map<String, Value>,
        options: &ValidateOptions,
    ) -> Result<Map<String, Value>, ValidateError> {
        self.run(&source, options).await.map(|()| source)
    }

    /// Validates `source`, delivering ordinary failures through `callback`.
    ///
    /// The callback is invoked exactly once with `None` on success or
    /// `Some(Invalid)` on failure — the same payload the deferred channel
    /// rejects with. A validator defect is a call-level failure: it is
    /// returned as this method's `Err` and never reaches the callback.
    pub async fn validate_callback<F>(
        &self,
        source: Map<String, Value>,
        options: &ValidateOptions,
        callback: F,
    ) -> Result<Map<String, Value>, Defect>
    where
        F: FnOnce(Option<Invalid>),
    {
        match self.run(&source, options).await {
            Ok(()) => {
                callback(None);
                Ok(source)
            }
            Err(ValidateError::Invalid(invalid)) => {
                callback(Some(invalid));
                Ok(source)
            }
            Err(ValidateError::Defect(defect)) => Err(defect),
        }
    }

    // Both public channels feed off this one schedule.
    async fn run(
        &self,
        source: &Map<String, Value>,
        options: &ValidateOptions,
    ) -> Result<(), ValidateError> {
        engine::run(&self.descriptor, source, options, self.messages.as_ref()).await
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
