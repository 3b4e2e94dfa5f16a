//! Message resolution.
//!
//! Every message the engine emits — the default templates, rule-supplied
//! messages, and built-in check messages — flows through a
//! [`MessageResolver`] before it lands in a `RuleError`, so a single
//! implementation can localize or rewrite all of them. The default resolver
//! substitutes the `{field}` placeholder and nothing else.

// ============================================================================
// TEMPLATES
// ============================================================================

/// Default message templates, used only when a rule supplies no explicit
/// message.
pub mod templates {
    /// A required field is missing or empty.
    pub const REQUIRED: &str = "{field} is required";
    /// A validator rejected the value without a message of its own.
    pub const FAILS: &str = "{field} fails";
}

// ============================================================================
// MESSAGE RESOLVER
// ============================================================================

/// Renders a message template for a field.
///
/// Implementations receive the raw template (which may be a rule's custom
/// message, a default template, or a built-in check message) and the owning
/// field's name, and return the final string.
pub trait MessageResolver: Send + Sync {
    /// Produces the final message for `field` from `template`.
    fn resolve(&self, template: &str, field: &str) -> String;
}

/// The default resolver: replaces every `{field}` occurrence with the field
/// name, leaving the rest of the template untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageResolver for DefaultMessages {
    fn resolve(&self, template: &str, field: &str) -> String {
        template.replace("{field}", field)
    }
}

// ============================================================================
// TESTS
// ============================================================================
