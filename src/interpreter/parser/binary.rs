use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            stream::{MAX_EXPRESSION_DEPTH, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses a left associative level of binary operators.
///
/// `operand` parses the next tighter level and `accepts` selects the
/// operators that belong to this level. Each produced node spans from the
/// first token of its left operand to the last token of its right operand.
///
/// A chain grows its tree one level per operator, so its height is checked
/// against [`MAX_EXPRESSION_DEPTH`] as it is built.
fn parse_left_assoc(tokens: &mut TokenStream<'_>,
                    operand: fn(&mut TokenStream<'_>) -> ParseResult<Expr>,
                    accepts: fn(BinaryOperator) -> bool)
                    -> ParseResult<Expr> {
    let start = tokens.start();
    let mut left = operand(tokens)?;
    let mut depth = left.depth();
    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && accepts(op)
    {
        tokens.next();
        let right = operand(tokens)?;
        let range = tokens.range_from(start);
        depth = depth.max(right.depth()) + 1;
        if depth > MAX_EXPRESSION_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_EXPRESSION_DEPTH,
                                                    range });
        }
        left = Expr::BinaryExpression { op,
                                        left: Box::new(left),
                                        right: Box::new(right),
                                        range };
    }
    Ok(left)
}

/// Parses relational and equality operators.
///
/// The rule is:
/// `comparison := additive (("==" | "!=" | "<" | "<=" | ">" | ">=") additive)*`
///
/// # Parameters
/// - `tokens`: Token cursor.
///
/// # Returns
/// A possibly nested `Expr::BinaryExpression` tree.
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, parse_additive, |op| op.precedence() == 1)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, parse_exponent, |op| {
        matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right associative:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`.
///
/// The rule is: `exponent := unary ("^" exponent)?`
pub fn parse_exponent(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let start = tokens.start();
    let base = parse_unary(tokens)?;
    if tokens.next_if_eq(&Token::Caret).is_none() {
        return Ok(base);
    }
    let exponent = tokens.nested(parse_exponent)?;
    Ok(Expr::BinaryExpression { op:    BinaryOperator::Pow,
                                left:  Box::new(base),
                                right: Box::new(exponent),
                                range: tokens.range_from(start), })
}

/// Maps a token to its corresponding binary operator.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use partscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::EqualEqual => Some(BinaryOperator::Eq),
        Token::BangEqual => Some(BinaryOperator::Neq),
        Token::Less => Some(BinaryOperator::Lt),
        Token::LessEqual => Some(BinaryOperator::Lte),
        Token::Greater => Some(BinaryOperator::Gt),
        Token::GreaterEqual => Some(BinaryOperator::Gte),
        _ => None,
    }
}
