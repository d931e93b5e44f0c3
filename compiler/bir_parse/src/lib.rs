//! Recursive descent parser for Bir.
//!
//! Produces a `bir_ir::Program`. Newlines are insignificant, so statement
//! boundaries are found purely from the grammar: a statement ends where the
//! next token can no longer continue it.

mod cursor;
mod error;
mod grammar;

use bir_ir::{Position, Program};
use bir_lexer::{Token, TokenKind};

pub use error::{ParseError, ParseErrorKind};

use cursor::Cursor;

/// Lex and parse a complete source file.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = bir_lexer::lex(source)?;
    parse_tokens(tokens)
}

/// Parse an already lexed token list.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Parser state.
pub(crate) struct Parser {
    cursor: Cursor,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Consume a token of the given kind or report what was found instead.
    fn expect(&mut self, kind: &TokenKind) -> Result<Position, ParseError> {
        if self.cursor.check(kind) {
            Ok(self.cursor.advance().position)
        } else {
            Err(ParseError::unexpected(
                kind.describe(),
                self.cursor.current_kind(),
                self.cursor.current_position(),
            ))
        }
    }

    /// Consume a closing delimiter. Running into the end of the file is
    /// reported against the opening delimiter.
    fn expect_closing(
        &mut self,
        close: &TokenKind,
        delimiter: char,
        opened_at: Position,
    ) -> Result<(), ParseError> {
        if self.cursor.is_at_end() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedDelimiter {
                    delimiter,
                    opened_at,
                },
                self.cursor.current_position(),
            ));
        }
        self.expect(close).map(|_| ())
    }
}
