use crate::{
    ast::SourceRange,
    error::ParseError,
    interpreter::{lexer::{SpannedToken, Token}, parser::core::ParseResult},
};

/// Parentheses, prefix operators, calls and function literals the parser may
/// have open at once.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Tallest expression tree a chain of operators such as `a + b + c` may
/// build.
pub const MAX_EXPRESSION_DEPTH: usize = 128;

/// A cursor over a tokenized source.
///
/// Besides the usual peek/next operations it remembers where the last
/// consumed token ended, which is what every node's range ends at.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens:     &'a [SpannedToken],
    pos:        usize,
    source_len: usize,
    depth:      usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor at the first token.
    ///
    /// `source_len` is used for the range of end-of-input errors.
    #[must_use]
    pub const fn new(tokens: &'a [SpannedToken], source_len: usize) -> Self {
        Self { tokens,
               pos: 0,
               source_len,
               depth: 0 }
    }

    /// Looks at the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos)
    }

    /// Looks `n` tokens ahead; `peek_nth(0)` is `peek()`.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos + n)
    }

    /// Start offset of the next token, or the end of the source.
    #[must_use]
    pub fn start(&self) -> usize {
        self.peek()
            .map_or(self.source_len, |(_, range)| range.start())
    }

    /// End offset of the most recently consumed token.
    #[must_use]
    pub fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(0, |(_, range)| range.end())
    }

    /// Range from `start` to the end of the most recently consumed token.
    #[must_use]
    pub fn range_from(&self, start: usize) -> SourceRange {
        SourceRange::new(start, self.previous_end())
    }

    /// Empty range at the end of the source.
    #[must_use]
    pub const fn end_of_input(&self) -> SourceRange {
        SourceRange::new(self.source_len, self.source_len)
    }

    /// Consumes the next token if it equals `token`.
    pub fn next_if_eq(&mut self, token: &Token) -> Option<SourceRange> {
        match self.peek() {
            Some((next, range)) if next == token => {
                self.pos += 1;
                Some(*range)
            },
            _ => None,
        }
    }

    /// Consumes `token` or fails with a description of what was expected.
    ///
    /// # Errors
    /// - `ExpectedToken` if a different token is next.
    /// - `UnexpectedEndOfInput` if the stream is exhausted.
    pub fn expect(&mut self, token: &Token, expected: &'static str) -> ParseResult<SourceRange> {
        if let Some(range) = self.next_if_eq(token) {
            return Ok(range);
        }
        Err(match self.peek() {
            Some((found, range)) => ParseError::ExpectedToken { expected,
                                                                found: found.to_string(),
                                                                range: *range },
            None => ParseError::UnexpectedEndOfInput { range: self.end_of_input() },
        })
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// `NestingTooDeep` at the next token once [`MAX_NESTING_DEPTH`] levels
    /// are open, otherwise whatever `parse` returns.
    pub fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let range = self.peek().map_or(self.end_of_input(), |(_, range)| *range);
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                    range });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Error for the token at the cursor, or end of input.
    #[must_use]
    pub fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some((token, range)) => ParseError::UnexpectedToken { token: token.to_string(),
                                                                  range: *range },
            None => ParseError::UnexpectedEndOfInput { range: self.end_of_input() },
        }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = &'a SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }
}
