/// Core parsing entry points.
///
/// Contains the program and expression entry points and the shared
/// `ParseResult` alias.
pub mod core;

/// Token cursor used by every parsing routine.
///
/// Tracks the byte offsets of consumed tokens so that node ranges span
/// exactly the tokens they were built from.
pub mod stream;

/// Unary and primary expression parsing.
///
/// Handles prefix operators, literals, identifiers, calls, grouping and
/// function literals.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence levels for comparison, additive, multiplicative
/// and exponent operators.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides comma separated list parsing and identifier helpers.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, `return` statements and expression statements.
pub mod statement;
