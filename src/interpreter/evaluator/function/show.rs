use tracing::info;

use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::CallContext},
    value::core::{MemoryItem, Value},
};

/// Records every argument for display and returns the first one unchanged.
///
/// Values are not printed here; the host decides how to present
/// [`ExecOutcome::shown`](crate::interpreter::evaluator::core::ExecOutcome).
///
/// # Parameters
/// - `call`: The call context.
/// - `args`: At least one argument.
///
/// # Returns
/// The first argument.
pub fn show(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    let Some(first) = args.first() else {
        return Err(call.invalid_argument("show needs at least one value".to_string()));
    };

    for arg in args {
        info!(range = %call.source_range, value = %arg.value, "show");
        call.shown.push(arg.value.clone());
    }
    Ok(first.value.clone())
}
