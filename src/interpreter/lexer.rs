use std::fmt;

use logos::Logos;

use crate::{ast::SourceRange, error::LexError};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Whitespace and comments are skipped by the lexer and never show up here;
/// their bytes still count towards the offsets of the tokens that follow.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens with their escapes resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string, allow_greedy = true)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, parse_string, allow_greedy = true)]
    String(String),
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `const`
    #[token("const")]
    Const,
    /// `let`
    #[token("let")]
    Let,
    /// `var`
    #[token("var")]
    Var,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `return`
    #[token("return")]
    Return,
    /// Identifier tokens; variable or function names such as `x` or
    /// `startSketchAt`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    MultiLineComment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
}

/// A token together with the byte range it was read from.
pub type SpannedToken = (Token, SourceRange);

/// Tokenizes `source` in a single left-to-right pass.
///
/// # Parameters
/// - `source`: The complete script text.
///
/// # Returns
/// - `Ok(Vec<SpannedToken>)`: Every token in source order with its byte
///   range. Slicing `source` with a range yields the token's raw text.
/// - `Err(LexError)`: The first invalid character or unterminated string.
///
/// # Example
/// ```
/// use partscript::{ast::SourceRange, interpreter::lexer::{Token, tokenize}};
///
/// let tokens = tokenize("const a = 3 // three").unwrap();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[3], (Token::Number(3.0), SourceRange::new(10, 11)));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, SourceRange::new(span.start, span.end))),
            Err(()) => return Err(lex_error(source, span.start)),
        }
    }

    Ok(tokens)
}

/// Classifies a lexing failure starting at `offset`.
fn lex_error(source: &str, offset: usize) -> LexError {
    let character = source.get(offset..)
                          .and_then(|rest| rest.chars().next())
                          .unwrap_or('\0');
    if character == '"' || character == '\'' {
        let end = source[offset..].find('\n')
                                  .map_or(source.len(), |newline| offset + newline);
        LexError::UnterminatedString { range: SourceRange::new(offset, end) }
    } else {
        LexError::InvalidCharacter { character,
                                     range: SourceRange::new(offset,
                                                             offset + character.len_utf8()) }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal and resolves its escapes.
///
/// Unknown escapes keep the escaped character as is.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = slice.get(1..slice.len() - 1)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }

    Some(out)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => crate::ast::write_number(f, *n),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Identifier(name) => f.write_str(name),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Const => f.write_str("const"),
            Self::Let => f.write_str("let"),
            Self::Var => f.write_str("var"),
            Self::Fn => f.write_str("fn"),
            Self::Return => f.write_str("return"),
            Self::Comment | Self::MultiLineComment => f.write_str("comment"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Caret => f.write_str("^"),
            Self::EqualEqual => f.write_str("=="),
            Self::BangEqual => f.write_str("!="),
            Self::Less => f.write_str("<"),
            Self::LessEqual => f.write_str("<="),
            Self::Greater => f.write_str(">"),
            Self::GreaterEqual => f.write_str(">="),
            Self::Bang => f.write_str("!"),
            Self::Equals => f.write_str("="),
            Self::Arrow => f.write_str("=>"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::Comma => f.write_str(","),
        }
    }
}
