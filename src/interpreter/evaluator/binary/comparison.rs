use crate::{
    ast::{BinaryOperator, SourceRange},
    interpreter::{
        evaluator::{
            binary::core::mismatch,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Numbers support every comparison operator. Strings and booleans only
    /// support `==` and `!=`. Comparing values of different types, or
    /// geometry, functions and opaque values, is a `TypeMismatch`.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `range`: Range reported on failure.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use partscript::{
    ///     ast::{BinaryOperator, SourceRange},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let range = SourceRange::new(0, 5);
    /// let result = Context::eval_comparison(BinaryOperator::Lt,
    ///                                       &Value::Number(3.0),
    ///                                       &Value::Number(5.0),
    ///                                       range);
    ///
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           range: SourceRange)
                           -> EvalResult<Value> {
        use BinaryOperator::{Eq, Gt, Gte, Lt, Lte, Neq};

        let result = match (left, right) {
            (Value::Number(a), Value::Number(b)) => match op {
                Eq => a == b,
                Neq => a != b,
                Lt => a < b,
                Lte => a <= b,
                Gt => a > b,
                Gte => a >= b,
                _ => return Err(mismatch(op, left, right, range)),
            },
            (Value::String(a), Value::String(b)) => equality(op, a == b)
                .ok_or_else(|| mismatch(op, left, right, range))?,
            (Value::Boolean(a), Value::Boolean(b)) => equality(op, a == b)
                .ok_or_else(|| mismatch(op, left, right, range))?,
            _ => return Err(mismatch(op, left, right, range)),
        };
        Ok(Value::Boolean(result))
    }
}

/// Maps an equality operator and an equality result to the final boolean;
/// `None` for operators other than `==` and `!=`.
const fn equality(op: BinaryOperator, is_equal: bool) -> Option<bool> {
    match op {
        BinaryOperator::Eq => Some(is_equal),
        BinaryOperator::Neq => Some(!is_equal),
        _ => None,
    }
}
