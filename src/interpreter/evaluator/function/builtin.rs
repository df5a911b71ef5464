use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::CallContext, utils::check_arity},
    value::core::{MemoryItem, Value},
};

/// Applies a single argument `f64` method to a numeric argument.
///
/// The generated functions accept exactly one argument. Domain errors follow
/// IEEE semantics, so `sqrt(-1)` is NaN rather than an error. Non-numeric
/// arguments produce a `TypeMismatch` error.
///
/// # Example
/// ```
/// use partscript::{
///     ast::SourceRange,
///     engine::CommandLog,
///     interpreter::{
///         evaluator::function::{builtin::sqrt, core::CallContext},
///         value::core::{MemoryItem, Metadata, Value},
///     },
/// };
///
/// let mut engine = CommandLog::default();
/// let mut shown = Vec::new();
/// let mut call = CallContext { code:            "sqrt(16)",
///                              name:            "sqrt",
///                              source_range:    SourceRange::new(0, 8),
///                              path_to_node:    &[0, 0],
///                              argument_ranges: &[SourceRange::new(5, 7)],
///                              engine:          &mut engine,
///                              shown:           &mut shown, };
///
/// let arg = MemoryItem::new(Value::Number(16.0), Metadata::default());
/// assert_eq!(sqrt(&mut call, &[arg]).unwrap(), Value::Number(4.0));
/// ```
macro_rules! unary_math {
    ($fname:ident, $method:ident) => {
        pub fn $fname(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
            check_arity(call.name, args, 1, call.source_range)?;

            let x = args[0].value.as_number(call.argument_range(0))?;
            Ok(Value::Number(x.$method()))
        }
    };
}

unary_math!(sqrt, sqrt);
unary_math!(sin, sin);
unary_math!(cos, cos);
unary_math!(tan, tan);
unary_math!(asin, asin);
unary_math!(acos, acos);
unary_math!(atan, atan);
unary_math!(ln, ln);
unary_math!(exp, exp);
unary_math!(abs, abs);
unary_math!(floor, floor);
unary_math!(ceil, ceil);
unary_math!(round, round);

/// Returns π. Takes no arguments.
pub fn pi(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    check_arity(call.name, args, 0, call.source_range)?;

    Ok(Value::Number(std::f64::consts::PI))
}
