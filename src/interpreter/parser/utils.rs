use crate::{
    ast::Identifier,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, stream::TokenStream},
    },
};

/// Parses `item ("," item)*` up to and including `closing`.
///
/// Used for call arguments and function parameters. A closing token right
/// away yields an empty list; a trailing comma is rejected because the item
/// parser runs again after every comma.
///
/// # Errors
/// The item parser's error, `ExpectedToken` for anything other than a comma
/// or `closing` between items, or `UnexpectedEndOfInput`.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.next_if_eq(closing).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, range)) => {
                return Err(ParseError::ExpectedToken { expected: "',' or a closing bracket",
                                                       found:    tok.to_string(),
                                                       range:    *range, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { range: tokens.end_of_input() }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier together with its range.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>)
                                                       -> ParseResult<Identifier> {
    match tokens.peek() {
        Some((Token::Identifier(name), range)) => {
            tokens.next();
            Ok(Identifier::new(name, *range))
        },
        Some((tok, range)) => Err(ParseError::ExpectedToken { expected: "an identifier",
                                                              found:    tok.to_string(),
                                                              range:    *range, }),
        None => Err(ParseError::UnexpectedEndOfInput { range: tokens.end_of_input() }),
    }
}
