use thiserror::Error;

use crate::ast::SourceRange;

/// Lexing errors.
///
/// Raised by the tokenizer for characters that cannot start any token and for
/// string literals that never close.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST from a token
/// sequence: unexpected tokens, premature end of input, and statements that
/// are not allowed where they appear.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during execution. Runtime
/// errors include duplicate bindings, unresolved names, type mismatches,
/// exhausted resource budgets and invalid standard library arguments.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error that can end a compilation or execution pass.
///
/// Every variant points at the source range that caused it, so callers can
/// highlight the offending text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token sequence does not form a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Execution failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The source range implicated by the error.
    ///
    /// ## Example
    /// ```
    /// use partscript::{ast::SourceRange, parse};
    ///
    /// let err = parse("const a = $").unwrap_err();
    /// assert_eq!(err.source_range(), SourceRange::new(10, 11));
    /// ```
    #[must_use]
    pub const fn source_range(&self) -> SourceRange {
        match self {
            Self::Lex(e) => e.source_range(),
            Self::Parse(e) => e.source_range(),
            Self::Runtime(e) => e.source_range(),
        }
    }
}
