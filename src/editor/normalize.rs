use crate::ast::{Expr, LiteralValue, UnaryOperator};

/// The multiplier applied to a value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Keep the value as is.
    Positive,
    /// Negate the value.
    Negative,
}

impl From<f64> for Sign {
    /// Negative multipliers map to [`Sign::Negative`], everything else to
    /// [`Sign::Positive`].
    fn from(multiplier: f64) -> Self {
        if multiplier < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

/// Which rewrites [`normalize_sign`] performs.
///
/// The rewrites are applied the same way whether the expression was
/// substituted by a variable or passed in as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Rewrite `-(-x)` to `x`.
    pub collapse_double_negation: bool,
    /// Rewrite `-(-5)` and a negation of a negative number literal to a
    /// single positive literal.
    pub fold_negative_literals:   bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { collapse_double_negation: true,
               fold_negative_literals:   true, }
    }
}

/// Applies `sign` to a value expression and removes redundant negations.
///
/// When `variable` is given, the value is replaced by a reference to that
/// variable, keeping the value's range. The result is then negated if
/// `sign` is negative and finally simplified according to `options`. Program
/// Memory is never consulted.
///
/// Normalizing an already normalized expression with [`Sign::Positive`]
/// returns it unchanged.
///
/// # Parameters
/// - `value`: The expression to rewrite.
/// - `sign`: The multiplier to apply.
/// - `variable`: Optional name to substitute for `value`.
/// - `options`: Which simplifications to perform.
///
/// # Example
/// ```
/// use partscript::{
///     editor::{NormalizeOptions, Sign, normalize_sign},
///     parse,
/// };
///
/// let program = parse("-5").unwrap();
/// let value = program.body[0].expression().clone();
///
/// let normalized = normalize_sign(value, Sign::Negative, None, NormalizeOptions::default());
/// assert_eq!(normalized.to_string(), "5");
/// ```
#[must_use]
pub fn normalize_sign(value: Expr,
                      sign: Sign,
                      variable: Option<&str>,
                      options: NormalizeOptions)
                      -> Expr {
    let value = match variable {
        Some(name) => Expr::identifier(name, value.range()),
        None => value,
    };
    let value = match sign {
        Sign::Positive => value,
        Sign::Negative => Expr::negate(value),
    };
    simplify(value, options)
}

/// Simplifies bottom-up, so every child is already in normal form when its
/// parent is inspected.
fn simplify(expr: Expr, options: NormalizeOptions) -> Expr {
    match expr {
        Expr::UnaryExpression { op: UnaryOperator::Neg,
                                argument,
                                range, } => {
            let argument = simplify(*argument, options);
            match argument {
                Expr::UnaryExpression { op: UnaryOperator::Neg,
                                        argument: inner,
                                        .. }
                    if options.collapse_double_negation => *inner,
                Expr::Literal { value: LiteralValue::Number(n),
                                .. }
                    if options.fold_negative_literals && n < 0.0 => Expr::number(-n, range),
                Expr::UnaryExpression { op: UnaryOperator::Neg,
                                        argument: inner,
                                        .. }
                    if options.fold_negative_literals
                       && matches!(*inner, Expr::Literal { value: LiteralValue::Number(n), .. } if n >= 0.0) =>
                {
                    *inner
                },
                argument => Expr::UnaryExpression { op: UnaryOperator::Neg,
                                                    argument: Box::new(argument),
                                                    range },
            }
        },
        Expr::UnaryExpression { op,
                                argument,
                                range, } => Expr::UnaryExpression { op,
                                                                    argument: Box::new(simplify(*argument, options)),
                                                                    range },
        Expr::BinaryExpression { op,
                                 left,
                                 right,
                                 range, } => Expr::BinaryExpression { op,
                                                                      left: Box::new(simplify(*left, options)),
                                                                      right: Box::new(simplify(*right, options)),
                                                                      range },
        Expr::CallExpression { callee,
                               arguments,
                               range, } => {
            Expr::CallExpression { callee,
                                   arguments: arguments.into_iter()
                                                       .map(|argument| simplify(argument, options))
                                                       .collect(),
                                   range }
        },
        Expr::Literal { .. } | Expr::Identifier { .. } | Expr::FunctionExpression(_) => expr,
    }
}
