//! The validator contract and the adapter that settles it.
//!
//! A validator decides whether one field's value satisfies one rule. Two
//! calling conventions are supported, mirroring how form-validation hooks
//! are written in practice:
//!
//! - **Return-value convention** — the validator returns a settled
//!   [`Verdict`] (or a future resolving to one) from [`Validator::check`].
//! - **Callback convention** — the validator keeps the [`Done`] handle it
//!   was given, returns [`ValidatorOutcome::Pending`], and settles the
//!   handle whenever its work completes.
//!
//! Either way, [`settle`] is the single place that waits the convention out
//! and hands the engine one `Result<Verdict, ValidatorFault>` — downstream
//! code never branches on how a validator was written.

use std::future::Future;

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::core::error::ValidatorFault;
use crate::core::options::ValidateOptions;
use crate::core::rule::Rule;

// ============================================================================
// INVOCATION CONTEXT
// ============================================================================

/// Everything a validator gets to look at: the rule it belongs to, the
/// owning field, the field's value, the whole source value set (for
/// cross-field checks), and the call's options.
///
/// The source is read-only for the duration of the call; validators that
/// need data past the synchronous part of their body (e.g. inside a
/// returned future) clone what they need.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    /// The rule this validator is attached to.
    pub rule: &'a Rule,
    /// Name of the field under validation.
    pub field: &'a str,
    /// The field's value; `Null` when the field is absent from the source.
    pub value: &'a serde_json::Value,
    /// The complete source value set.
    pub source: &'a serde_json::Map<String, serde_json::Value>,
    /// The options of the enclosing `validate` call.
    pub options: &'a ValidateOptions,
}

// ============================================================================
// VERDICT
// ============================================================================

/// What a validator reports once it has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value satisfies the rule.
    Pass,
    /// The value does not satisfy the rule; the engine supplies the message
    /// (the rule's own, or the default template).
    Fail,
    /// The value does not satisfy the rule, with one message per error.
    Errors(Vec<String>),
}

impl Verdict {
    /// A failing verdict carrying a single message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Errors(vec![message.into()])
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// The immediate result of invoking a validator — the closed set of legal
/// result shapes.
pub enum ValidatorOutcome {
    /// Settled synchronously.
    Ready(Verdict),
    /// Settles when the future resolves.
    Deferred(BoxFuture<'static, Result<Verdict, ValidatorFault>>),
    /// The validator kept its [`Done`] handle and will settle through it.
    Pending,
}

impl std::fmt::Debug for ValidatorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(verdict) => f.debug_tuple("Ready").field(verdict).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
            Self::Pending => f.write_str("Pending"),
        }
    }
}

// ============================================================================
// DONE HANDLE
// ============================================================================

/// Completion handle for callback-convention validators.
///
/// Consuming methods make "settled exactly once" a type-level guarantee.
/// Dropping the handle without settling it is reported to the waiting
/// engine as a [`ValidatorFault`] — the handle is gone, so the verdict can
/// provably never arrive.
#[derive(Debug)]
pub struct Done {
    tx: oneshot::Sender<Verdict>,
}

impl Done {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Verdict>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Settles with a pass.
    pub fn ok(self) {
        self.settle(Verdict::Pass);
    }

    /// Settles with a generic failure; the engine supplies the message.
    pub fn fail(self) {
        self.settle(Verdict::Fail);
    }

    /// Settles with a single error message.
    pub fn error(self, message: impl Into<String>) {
        self.settle(Verdict::error(message));
    }

    /// Settles with one error per message.
    pub fn errors<I, S>(self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settle(Verdict::Errors(messages.into_iter().map(Into::into).collect()));
    }

    /// Settles with an explicit verdict.
    pub fn settle(self, verdict: Verdict) {
        // The engine only listens while the rule is pending; a send into a
        // completed call is a no-op.
        let _ = self.tx.send(verdict);
    }
}

// ============================================================================
// VALIDATOR TRAIT
// ============================================================================

/// A custom check attached to a rule.
///
/// `check` runs synchronously and returns one of the [`ValidatorOutcome`]
/// shapes; returning `Err` reports a fault in the validator itself (a bug or
/// an unavailable backend), which is not a verdict about the value.
///
/// Closures of the same shape implement this trait directly; for the common
/// synchronous and future-returning forms see [`from_fn`] and
/// [`deferred_fn`].
pub trait Validator: Send + Sync {
    /// Invokes the check for one (rule, value) pair.
    fn check(
        &self,
        cx: &Invocation<'_>,
        done: Done,
    ) -> Result<ValidatorOutcome, ValidatorFault>;
}

impl<F> Validator for F
where
    F: Fn(&Invocation<'_>, Done) -> Result<ValidatorOutcome, ValidatorFault> + Send + Sync,
{
    fn check(
        &self,
        cx: &Invocation<'_>,
        done: Done,
    ) -> Result<ValidatorOutcome, ValidatorFault> {
        self(cx, done)
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Return-value-convention validator from a plain function.
///
/// # Examples
///
/// ```rust,ignore
/// use trellis_schema::validator::{from_fn, Verdict};
///
/// let non_empty = from_fn(|cx| {
///     Ok(Verdict::from(cx.value.as_str().is_some_and(|s| !s.is_empty())))
/// });
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Invocation<'_>) -> Result<Verdict, ValidatorFault> + Send + Sync,
{
    FromFn { f }
}

/// See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> Validator for FromFn<F>
where
    F: Fn(&Invocation<'_>) -> Result<Verdict, ValidatorFault> + Send + Sync,
{
    fn check(
        &self,
        cx: &Invocation<'_>,
        _done: Done,
    ) -> Result<ValidatorOutcome, ValidatorFault> {
        Ok(ValidatorOutcome::Ready((self.f)(cx)?))
    }
}

/// Deferred validator from a function returning a future.
///
/// The closure runs synchronously and clones whatever the future needs from
/// the invocation; the returned future is awaited by the engine.
///
/// # Examples
///
/// ```rust,ignore
/// use trellis_schema::validator::{deferred_fn, Verdict};
///
/// let remote = deferred_fn(|cx| {
///     let value = cx.value.clone();
///     async move { Ok(Verdict::from(lookup(&value).await)) }
/// });
/// ```
pub fn deferred_fn<F, Fut>(f: F) -> DeferredFn<F>
where
    F: Fn(&Invocation<'_>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Verdict, ValidatorFault>> + Send + 'static,
{
    DeferredFn { f }
}

/// See [`deferred_fn`].
#[derive(Clone)]
pub struct DeferredFn<F> {
    f: F,
}

impl<F, Fut> Validator for DeferredFn<F>
where
    F: Fn(&Invocation<'_>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Verdict, ValidatorFault>> + Send + 'static,
{
    fn check(
        &self,
        cx: &Invocation<'_>,
        _done: Done,
    ) -> Result<ValidatorOutcome, ValidatorFault> {
        Ok(ValidatorOutcome::Deferred(Box::pin((self.f)(cx))))
    }
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Waits out whichever convention the validator used and returns its settled
/// verdict.
///
/// No timeout is imposed: a validator that holds its [`Done`] handle (or a
/// never-resolving future) suspends the call until it settles. A handle
/// that is *dropped* unsettled can never settle, and is reported as a
/// fault instead of waiting forever.
pub(crate) async fn settle(
    validator: &dyn Validator,
    cx: &Invocation<'_>,
) -> Result<Verdict, ValidatorFault> {
    let (done, waiter) = Done::channel();
    match validator.check(cx, done)? {
        ValidatorOutcome::Ready(verdict) => Ok(verdict),
        ValidatorOutcome::Deferred(future) => future.await,
        ValidatorOutcome::Pending => waiter.await.map_err(|_| {
            ValidatorFault::new("completion handle dropped without settling")
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
