//! The scheduler: fans validation out over all declared fields and
//! reassembles a deterministic result.
//!
//! Every field runner (and under it, every rule runner) is driven to
//! completion before anything is assembled; the final ordering is always
//! (field declaration order, then rule declaration order), recomputed from
//! per-slot results after the fan-out settles. Completion order — and with
//! it validator latency — can never leak into the output.

mod field;
mod rule;

use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::core::error::{Invalid, ValidateError};
use crate::core::options::ValidateOptions;
use crate::messages::MessageResolver;
use crate::schema::Descriptor;

/// Runs the whole schedule; `Ok(())` means the source passed.
pub(crate) async fn run(
    descriptor: &Descriptor,
    source: &Map<String, Value>,
    options: &ValidateOptions,
    messages: &dyn MessageResolver,
) -> Result<(), ValidateError> {
    static NULL: Value = Value::Null;

    trace!(
        fields = descriptor.len(),
        first = options.first,
        "scheduling validation"
    );

    let runners = descriptor.iter().map(|(name, rules)| {
        let value = source.get(name).unwrap_or(&NULL);
        field::run_field(name, rules, value, source, options, messages)
    });
    let settled = join_all(runners).await;

    // Everything has settled; assemble in declaration order.
    let mut groups = Vec::with_capacity(settled.len());
    for ((name, _), outcome) in descriptor.iter().zip(settled) {
        match outcome {
            Ok(errors) => groups.push((name.to_string(), errors)),
            Err(defect) => {
                debug!(field = %defect.field, "validator defect aborts validation");
                return Err(defect.into());
            }
        }
    }

    let invalid = Invalid::from_groups(groups);
    if invalid.errors.is_empty() {
        return Ok(());
    }
    let invalid = if options.first {
        invalid.into_first()
    } else {
        invalid
    };
    debug!(errors = invalid.errors.len(), "validation failed");
    Err(ValidateError::Invalid(invalid))
}
