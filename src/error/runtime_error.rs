use thiserror::Error;

use crate::ast::SourceRange;

/// Represents all errors that can occur during execution.
///
/// Every error is terminal for the pass that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A name was declared twice in the same scope.
    #[error("Error at {range}: '{name}' is already defined in this scope.")]
    DuplicateBinding {
        /// The name of the variable.
        name:  String,
        /// Range of the second declaration.
        range: SourceRange,
    },
    /// Tried to use an undefined variable.
    #[error("Error at {range}: Unknown variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:  String,
        /// Range of the identifier.
        range: SourceRange,
    },
    /// Called a name that is neither a function in memory nor a standard
    /// library function.
    #[error("Error at {range}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name:  String,
        /// Range of the callee.
        range: SourceRange,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error at {range}: Type error: {details}.")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// Range of the offending expression.
        range:   SourceRange,
    },
    /// The step or call depth budget was exceeded.
    #[error("Error at {range}: Resource exhausted: {details}.")]
    ResourceExhausted {
        /// Which budget was exceeded.
        details: String,
        /// Range of the node being evaluated when the budget ran out.
        range:   SourceRange,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error at {range}: '{name}' expects {expected} argument(s) but got {found}.")]
    ArgumentCountMismatch {
        /// The called function.
        name:     String,
        /// Human readable accepted arity.
        expected: String,
        /// Number of arguments supplied.
        found:    usize,
        /// Range of the call.
        range:    SourceRange,
    },
    /// An argument had the right type but an unusable value.
    #[error("Error at {range}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// Range of the argument or call.
        range:   SourceRange,
    },
    /// A function body finished without returning a value.
    #[error("Error at {range}: Function '{name}' did not return a value.")]
    MissingValue {
        /// The called function.
        name:  String,
        /// Range of the call.
        range: SourceRange,
    },
}

impl RuntimeError {
    /// The source range implicated by the error.
    #[must_use]
    pub const fn source_range(&self) -> SourceRange {
        match self {
            Self::DuplicateBinding { range, .. }
            | Self::UndefinedVariable { range, .. }
            | Self::UnknownFunction { range, .. }
            | Self::TypeMismatch { range, .. }
            | Self::ResourceExhausted { range, .. }
            | Self::ArgumentCountMismatch { range, .. }
            | Self::InvalidArgument { range, .. }
            | Self::MissingValue { range, .. } => *range,
        }
    }
}
