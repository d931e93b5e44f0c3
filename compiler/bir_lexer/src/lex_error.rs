//! Lexer error types.

use bir_diagnostic::{Diagnostic, ErrorCode};
use bir_ir::Position;

/// What kind of lexer error occurred.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// Input that matches no token rule.
    #[error("invalid character `{0}`")]
    InvalidCharacter(String),
    /// Numeric literal that does not fit in an `i64`.
    #[error("number literal `{0}` is out of range")]
    NumberOverflow(String),
    /// Missing closing `"`.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Escape outside of `\" \\ \n \t \b \f \r`.
    #[error("invalid escape `\\{0}` in string literal")]
    InvalidEscape(char),
}

/// A lexer error and where it happened.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        LexError { kind, position }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0001,
            LexErrorKind::NumberOverflow(_) => ErrorCode::E0002,
            LexErrorKind::UnterminatedString | LexErrorKind::InvalidEscape(_) => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at(self.position)
    }
}
