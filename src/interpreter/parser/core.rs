use tracing::trace;

use crate::{
    ast::{Expr, Program, SourceRange},
    error::ParseError,
    interpreter::{
        lexer::SpannedToken,
        parser::{binary::parse_comparison, statement::parse_statement, stream::TokenStream},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Builds a [`Program`] from a complete token sequence.
///
/// Statements are parsed in order until the tokens run out. The program range
/// covers the whole source, including leading and trailing whitespace.
///
/// # Parameters
/// - `tokens`: The output of [`tokenize`](crate::interpreter::lexer::tokenize).
/// - `source_len`: Length in bytes of the source the tokens came from.
///
/// # Returns
/// The parsed program, or the first `ParseError` encountered.
///
/// # Example
/// ```
/// use partscript::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let source = "const a = 3\nshow(a)";
/// let tokens = tokenize(source).unwrap();
/// let program = parse_program(&tokens, source.len()).unwrap();
///
/// assert_eq!(program.body.len(), 2);
/// ```
pub fn parse_program(tokens: &[SpannedToken], source_len: usize) -> ParseResult<Program> {
    let mut stream = TokenStream::new(tokens, source_len);
    let mut body = Vec::new();

    while stream.peek().is_some() {
        body.push(parse_statement(&mut stream, false)?);
    }
    trace!(statements = body.len(), "parsed program");

    Ok(Program { body,
                 range: SourceRange::new(0, source_len) })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, comparison, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_comparison(tokens)
}
