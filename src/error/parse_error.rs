use thiserror::Error;

use crate::ast::SourceRange;

/// Represents all errors that can occur while building the AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error at {range}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The source text of the token encountered.
        token: String,
        /// Range of the token.
        range: SourceRange,
    },
    /// A specific token was required but something else was found.
    #[error("Error at {range}: Expected {expected} but found {found}.")]
    ExpectedToken {
        /// Description of what the parser was looking for.
        expected: &'static str,
        /// The source text of the token found instead.
        found:    String,
        /// Range of the token found.
        range:    SourceRange,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error at {range}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Empty range at the end of the source.
        range: SourceRange,
    },
    /// The expression nests deeper than the parser allows.
    #[error("Error at {range}: Expression nested deeper than {limit} levels.")]
    NestingTooDeep {
        /// The limit that was exceeded.
        limit: usize,
        /// Range of the token or expression crossing the limit.
        range: SourceRange,
    },
    /// `return` used outside of a function body.
    #[error("Error at {range}: 'return' is only allowed inside a function body.")]
    ReturnOutsideFunction {
        /// Range of the return statement.
        range: SourceRange,
    },
}

impl ParseError {
    /// The source range of the offending token.
    #[must_use]
    pub const fn source_range(&self) -> SourceRange {
        match self {
            Self::UnexpectedToken { range, .. }
            | Self::ExpectedToken { range, .. }
            | Self::UnexpectedEndOfInput { range }
            | Self::NestingTooDeep { range, .. }
            | Self::ReturnOutsideFunction { range } => *range,
        }
    }
}
