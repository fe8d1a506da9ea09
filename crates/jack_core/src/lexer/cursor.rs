//! Token cursor: random-access buffer with one token of lookahead.
//!
//! Mirrors the tokenizer's cursor contract from the spec: no current token
//! until the first `advance`, and typed accessors that only return `Some`
//! when the current token has the matching shape.

use super::token::{Keyword, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    index: Option<usize>,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: None }
    }

    pub fn has_more(&self) -> bool {
        let next = self.index.map(|i| i + 1).unwrap_or(0);
        next < self.tokens.len()
    }

    /// Advance to the next token. Precondition: `has_more()`.
    pub fn advance(&mut self) -> &Token {
        debug_assert!(self.has_more(), "advance called with no more tokens");
        let next = self.index.map(|i| i + 1).unwrap_or(0);
        self.index = Some(next);
        &self.tokens[next]
    }

    pub fn current(&self) -> Option<&Token> {
        self.index.and_then(|i| self.tokens.get(i))
    }

    /// Moves past the end of the stream: `current()` becomes `None` and
    /// `has_more()` stays `false`. Used when a grammar rule legitimately
    /// finishes at the last token, so there is nothing left to `advance`
    /// into.
    pub fn exhaust(&mut self) {
        self.index = Some(self.tokens.len());
    }

    pub fn current_line(&self) -> usize {
        self.current().map(|t| t.span.line).unwrap_or(0)
    }

    pub fn current_line_text(&self) -> String {
        self.current()
            .map(|t| t.span.line_text.clone())
            .unwrap_or_default()
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.current()?.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self.current()?.kind {
            TokenKind::Symbol(c) => Some(c),
            _ => None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.current()?.kind {
            TokenKind::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn int_val(&self) -> Option<u16> {
        match self.current()?.kind {
            TokenKind::IntegerConstant(n) => Some(n),
            _ => None,
        }
    }

    pub fn string_val(&self) -> Option<&str> {
        match &self.current()?.kind {
            TokenKind::StringConstant(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::Span;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Span::new(1, "".to_string()))
    }

    #[test]
    fn no_current_token_before_first_advance() {
        let cursor = TokenCursor::new(vec![tok(TokenKind::Symbol('{'))]);
        assert!(cursor.current().is_none());
        assert!(cursor.has_more());
    }

    #[test]
    fn advance_walks_forward() {
        let mut cursor = TokenCursor::new(vec![
            tok(TokenKind::Symbol('{')),
            tok(TokenKind::Symbol('}')),
        ]);
        assert_eq!(cursor.advance().kind, TokenKind::Symbol('{'));
        assert!(cursor.has_more());
        assert_eq!(cursor.advance().kind, TokenKind::Symbol('}'));
        assert!(!cursor.has_more());
    }

    #[test]
    fn typed_accessors_reject_wrong_shape() {
        let mut cursor = TokenCursor::new(vec![tok(TokenKind::Symbol('{'))]);
        cursor.advance();
        assert_eq!(cursor.symbol(), Some('{'));
        assert_eq!(cursor.keyword(), None);
        assert_eq!(cursor.identifier(), None);
    }
}
