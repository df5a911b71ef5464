use crate::{
    ast::{SourceRange, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Neg`: numeric negation.
    /// - `Not`: boolean negation.
    ///
    /// Double negation is evaluated as written; simplifying `--x` is left to
    /// the editor's normalization helpers.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `range`: Range reported on failure.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use partscript::{
    ///     ast::{SourceRange, UnaryOperator},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let range = SourceRange::new(0, 2);
    ///
    /// let v = Context::eval_unary(UnaryOperator::Neg, &Value::Number(5.0), range).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Boolean(false), range).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, range: SourceRange) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (op, value) => {
                Err(RuntimeError::TypeMismatch { details: format!("cannot apply '{op}' to {}",
                                                                  value.type_name()),
                                                 range })
            },
        }
    }
}
