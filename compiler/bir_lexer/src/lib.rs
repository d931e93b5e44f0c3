//! Lexer for Bir using logos.
//!
//! `lex` turns source text into a flat token list terminated by `Eof`.
//! Every token carries a 1-based line/column position; columns count
//! characters, not bytes.

mod convert;
mod lex_error;
mod raw_token;
mod token;

use bir_ir::Position;
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};

use raw_token::RawToken;

/// Tokenize `source`. Stops at the first error.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let lines = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let position = lines.position(source, span.start);
        let slice = lexer.slice();
        let Ok(raw) = raw else {
            return Err(LexError::new(
                LexErrorKind::InvalidCharacter(slice.to_string()),
                position,
            ));
        };
        let kind = convert::convert(raw, slice).map_err(|kind| LexError::new(kind, position))?;
        tokens.push(Token::new(kind, position));
    }

    tokens.push(Token::new(
        TokenKind::Eof,
        lines.position(source, source.len()),
    ));
    Ok(tokens)
}

/// Byte offsets of line starts, for offset to line/column mapping.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex { starts }
    }

    fn position(&self, source: &str, offset: usize) -> Position {
        let line = match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let start = self.starts.get(line).copied().unwrap_or(0);
        let col = source
            .get(start..offset)
            .map_or(0, |text| text.chars().count());
        Position::new(to_u32(line + 1), to_u32(col + 1))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
