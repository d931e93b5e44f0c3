//! Token cursor for navigating the token stream.

use std::mem;

use bir_ir::Position;
use bir_lexer::{Token, TokenKind};
use tracing::trace;

/// Cursor over a lexed token list.
///
/// Reads past the end keep returning the `Eof` token, so lookahead never
/// needs a bounds check at the call site.
pub struct Cursor {
    tokens: Vec<Token>,
    eof: Token,
    pos: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_position = tokens
            .last()
            .map_or(Position::new(1, 1), |token| token.position);
        Cursor {
            tokens,
            eof: Token::new(TokenKind::Eof, eof_position),
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_position(&self) -> Position {
        self.current().position
    }

    /// Kind of the token `n` places ahead of the current one.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&self.eof.kind, |token| &token.kind)
    }

    /// Check the current token's kind, ignoring any payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(self.current_kind()) == mem::discriminant(kind)
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            trace!(kind = ?token.kind, at = %token.position, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}
