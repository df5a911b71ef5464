use crate::{
    ast::{BinaryOperator, SourceRange},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic goes to `eval_scalar_op`, `+` on two strings concatenates,
    /// and relational and equality operators go to `eval_comparison`. Any
    /// other combination of operator and operand types is a `TypeMismatch`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `range`: Range of the whole binary expression.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use partscript::{
    ///     ast::{BinaryOperator, SourceRange},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let range = SourceRange::new(0, 5);
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::Number(3.0),
    ///                                   &Value::Number(4.0),
    ///                                   range);
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    ///
    /// let joined = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::String("ab".into()),
    ///                                   &Value::String("cd".into()),
    ///                                   range);
    /// assert_eq!(joined.unwrap(), Value::String("abcd".into()));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       range: SourceRange)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Eq, Gt, Gte, Lt, Lte, Mod, Mul, Neq, Pow, Sub};

        match op {
            Add | Sub | Mul | Div | Mod | Pow => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Self::eval_scalar_op(op, *a, *b, range),
                (Value::String(a), Value::String(b)) if op == Add => {
                    Ok(Value::String(format!("{a}{b}")))
                },
                _ => Err(mismatch(op, left, right, range)),
            },
            Eq | Neq | Lt | Lte | Gt | Gte => Self::eval_comparison(op, left, right, range),
        }
    }
}

/// Builds the `TypeMismatch` error for an unsupported operand pair.
pub(crate) fn mismatch(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       range: SourceRange)
                       -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("cannot apply '{op}' to {} and {}",
                                                  left.type_name(),
                                                  right.type_name()),
                                 range }
}
