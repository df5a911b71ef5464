use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::CallContext, utils::check_arity},
    value::core::{MemoryItem, Value},
};

/// Computes the minimum or maximum of two numbers.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`. Any non-numeric argument produces a `TypeMismatch` error. If one
/// argument is NaN the other one is returned.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `call`: The call context.
/// - `args`: Slice containing exactly two arguments.
///
/// # Returns
/// `Value::Number` holding the selected operand.
pub fn min_max(name: &str, call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    check_arity(name, args, 2, call.source_range)?;

    let left = args[0].value.as_number(call.argument_range(0))?;
    let right = args[1].value.as_number(call.argument_range(1))?;
    let value = if name == "min" {
        left.min(right)
    } else {
        left.max(right)
    };

    Ok(Value::Number(value))
}
