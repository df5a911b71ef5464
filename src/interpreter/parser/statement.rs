use crate::{
    ast::{Statement, VariableKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            stream::TokenStream,
            utils::parse_identifier,
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration (`const`, `let`, `var` or `fn`),
/// - a `return` statement, only when `in_function` is set,
/// - an expression used as a statement.
///
/// # Parameters
/// - `tokens`: Token cursor positioned at the statement.
/// - `in_function`: Whether the statement belongs to a function body.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement(tokens: &mut TokenStream<'_>, in_function: bool) -> ParseResult<Statement> {
    if let Some(statement) = parse_variable_declaration(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_return(tokens, in_function)? {
        return Ok(statement);
    }

    let start = tokens.start();
    let expr = parse_expression(tokens)?;
    Ok(Statement::Expression { expr,
                               range: tokens.range_from(start) })
}

/// Parses a variable declaration statement.
///
/// A declaration has the form `<kind> <identifier> = <expression>` where
/// `<kind>` is one of `const`, `let`, `var` or `fn`.
///
/// If the next token is not a declaring keyword, this function returns
/// `Ok(None)` and does not consume any input.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the identifier is missing,
/// - `=` is missing,
/// - the expression is malformed.
fn parse_variable_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Option<Statement>> {
    let kind = match tokens.peek() {
        Some((Token::Const, _)) => VariableKind::Const,
        Some((Token::Let, _)) => VariableKind::Let,
        Some((Token::Var, _)) => VariableKind::Var,
        Some((Token::Fn, _)) => VariableKind::Fn,
        _ => return Ok(None),
    };
    let start = tokens.start();
    tokens.next();

    let name = parse_identifier(tokens)?;
    tokens.expect(&Token::Equals, "'='")?;
    let value = parse_expression(tokens)?;

    Ok(Some(Statement::VariableDeclaration { kind,
                                             name,
                                             value,
                                             range: tokens.range_from(start) }))
}

/// Parses `return <expression>`.
///
/// # Errors
/// `ReturnOutsideFunction` when used at the top level.
fn parse_return(tokens: &mut TokenStream<'_>, in_function: bool) -> ParseResult<Option<Statement>> {
    let start = tokens.start();
    let Some(keyword) = tokens.next_if_eq(&Token::Return) else {
        return Ok(None);
    };
    let value = parse_expression(tokens)?;
    let range = tokens.range_from(start);
    if !in_function {
        return Err(ParseError::ReturnOutsideFunction { range: keyword.to(range) });
    }
    Ok(Some(Statement::Return { value, range }))
}

/// Parses a braced function body: `"{" statement* "}"`.
///
/// # Errors
/// `UnexpectedEndOfInput` if the closing brace is missing.
pub(in crate::interpreter::parser) fn parse_function_body(tokens: &mut TokenStream<'_>)
                                                          -> ParseResult<Vec<Statement>> {
    tokens.expect(&Token::LBrace, "'{'")?;
    let mut body = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(body);
            },
            Some(_) => body.push(parse_statement(tokens, true)?),
            None => return Err(ParseError::UnexpectedEndOfInput { range: tokens.end_of_input() }),
        }
    }
}
