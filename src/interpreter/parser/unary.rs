use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionExpression, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            statement::parse_function_body,
            stream::TokenStream,
            utils::{parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary
/// ```
/// Every call opens one nesting level, so runs of prefix operators and
/// parentheses are bounded.
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// An [`Expr::UnaryExpression`] or a primary expression.
///
/// # Errors
/// `NestingTooDeep` past [`MAX_NESTING_DEPTH`] open levels.
///
/// [`MAX_NESTING_DEPTH`]: crate::interpreter::parser::stream::MAX_NESTING_DEPTH
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    tokens.nested(|tokens| {
              let start = tokens.start();
              let op = match tokens.peek() {
                  Some((Token::Minus, _)) => UnaryOperator::Neg,
                  Some((Token::Bang, _)) => UnaryOperator::Not,
                  _ => return parse_primary(tokens),
              };
              tokens.next();
              let argument = parse_unary(tokens)?;
              Ok(Expr::UnaryExpression { op,
                                         argument: Box::new(argument),
                                         range: tokens.range_from(start) })
          })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - number, string and boolean literals
/// - identifiers
/// - function calls
/// - parenthesized expressions
/// - function literals (`(a, b) => { ... }`)
///
/// # Parameters
/// - `tokens`: Token cursor positioned at the expression.
///
/// # Returns
/// The parsed expression.
///
/// # Errors
/// - `UnexpectedToken` for tokens that cannot start an expression.
/// - `UnexpectedEndOfInput` if the tokens run out.
fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let literal = match tokens.peek() {
        Some((Token::Number(n), _)) => Some(LiteralValue::Number(*n)),
        Some((Token::String(s), _)) => Some(LiteralValue::String(s.clone())),
        Some((Token::True, _)) => Some(LiteralValue::Bool(true)),
        Some((Token::False, _)) => Some(LiteralValue::Bool(false)),
        _ => None,
    };
    if let Some(value) = literal
       && let Some((_, range)) = tokens.next()
    {
        return Ok(Expr::Literal { value,
                                  range: *range });
    }

    match tokens.peek() {
        Some((Token::Identifier(_), _)) => parse_identifier_or_call(tokens),
        Some((Token::LParen, _)) if is_function_start(tokens) => parse_function_expression(tokens),
        Some((Token::LParen, _)) => {
            tokens.next();
            let inner = parse_expression(tokens)?;
            tokens.expect(&Token::RParen, "')'")?;
            Ok(inner)
        },
        _ => Err(tokens.unexpected()),
    }
}

/// Parses an identifier, or a call if it is followed by `(`.
///
/// Grammar: `call := IDENT "(" (expression ("," expression)*)? ")"`
fn parse_identifier_or_call(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let callee = parse_identifier(tokens)?;

    if tokens.next_if_eq(&Token::LParen).is_none() {
        return Ok(Expr::Identifier { name:  callee.name,
                                     range: callee.range, });
    }

    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
    let range = tokens.range_from(callee.range.start());
    Ok(Expr::CallExpression { callee,
                              arguments,
                              range })
}

/// Returns `true` if the `(` at the cursor opens a parameter list, that is
/// `( IDENT ("," IDENT)* )` or `()` followed by `=>`.
fn is_function_start(tokens: &TokenStream<'_>) -> bool {
    let mut offset = 1;
    if let Some((Token::RParen, _)) = tokens.peek_nth(offset) {
        return matches!(tokens.peek_nth(offset + 1), Some((Token::Arrow, _)));
    }
    loop {
        if !matches!(tokens.peek_nth(offset), Some((Token::Identifier(_), _))) {
            return false;
        }
        offset += 1;
        match tokens.peek_nth(offset) {
            Some((Token::Comma, _)) => offset += 1,
            Some((Token::RParen, _)) => {
                return matches!(tokens.peek_nth(offset + 1), Some((Token::Arrow, _)));
            },
            _ => return false,
        }
    }
}

/// Parses a function literal.
///
/// Grammar: `function := "(" params ")" "=>" "{" statement* "}"`
///
/// # Errors
/// Returns a `ParseError` if the parameter list, the arrow or the body is
/// malformed.
fn parse_function_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let start = tokens.start();
    tokens.expect(&Token::LParen, "'('")?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    tokens.expect(&Token::Arrow, "'=>'")?;
    let body = parse_function_body(tokens)?;

    Ok(Expr::FunctionExpression(Rc::new(FunctionExpression { params,
                                                               body,
                                                               range: tokens.range_from(start) })))
}
