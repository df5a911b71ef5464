use thiserror::Error;

use crate::ast::SourceRange;

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("Error at {range}: Invalid character '{character}'.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Range covering the character.
        range:     SourceRange,
    },
    /// A string literal without its closing quote.
    #[error("Error at {range}: Unterminated string literal.")]
    UnterminatedString {
        /// Range from the opening quote to the end of the input.
        range: SourceRange,
    },
}

impl LexError {
    /// The source range of the offending text.
    #[must_use]
    pub const fn source_range(&self) -> SourceRange {
        match self {
            Self::InvalidCharacter { range, .. } | Self::UnterminatedString { range } => *range,
        }
    }
}
