use crate::{
    ast::{BinaryOperator, SourceRange},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates an arithmetic operation on two numbers.
    ///
    /// Division and remainder by zero are rejected instead of producing an
    /// infinity or NaN. The operator must be one of `Add`, `Sub`, `Mul`,
    /// `Div`, `Mod` or `Pow`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `range`: Range reported on failure.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed number.
    ///
    /// # Example
    /// ```
    /// use partscript::{
    ///     ast::{BinaryOperator, SourceRange},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let range = SourceRange::new(0, 3);
    /// let result = Context::eval_scalar_op(BinaryOperator::Pow, 2.0, 10.0, range).unwrap();
    /// assert_eq!(result, Value::Number(1024.0));
    ///
    /// assert!(Context::eval_scalar_op(BinaryOperator::Div, 1.0, 0.0, range).is_err());
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: f64,
                          right: f64,
                          range: SourceRange)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Pow, Sub};

        let result = match op {
            Add => left + right,
            Sub => left - right,
            Mul => left * right,
            Div | Mod if right == 0.0 => {
                return Err(RuntimeError::TypeMismatch { details: "division by zero".to_string(),
                                                        range });
            },
            Div => left / right,
            Mod => left % right,
            Pow => left.powf(right),
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("'{op}' is not an arithmetic operator"),
                                                        range });
            },
        };
        Ok(Value::Number(result))
    }
}
