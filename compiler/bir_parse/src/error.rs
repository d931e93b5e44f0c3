//! Parse error types.

use bir_diagnostic::{Diagnostic, ErrorCode};
use bir_ir::Position;
use bir_lexer::{LexError, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Tokenizing failed before parsing started.
    #[error(transparent)]
    Lex(LexError),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("unclosed `{delimiter}` opened at {opened_at}")]
    UnclosedDelimiter { delimiter: char, opened_at: Position },
    #[error("expected identifier, found {found}")]
    ExpectedIdentifier { found: String },
}

/// A parse error and where it happened.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError { kind, position }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, found: &TokenKind, position: Position) -> Self {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: found.describe(),
            },
            position,
        )
    }

    pub(crate) fn expected_expression(found: &TokenKind, position: Position) -> Self {
        ParseError::new(
            ParseErrorKind::ExpectedExpression {
                found: found.describe(),
            },
            position,
        )
    }

    pub(crate) fn expected_identifier(found: impl Into<String>, position: Position) -> Self {
        ParseError::new(
            ParseErrorKind::ExpectedIdentifier {
                found: found.into(),
            },
            position,
        )
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            ParseErrorKind::Lex(err) => err.code(),
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdentifier { .. } => ErrorCode::E1004,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at(self.position)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let position = err.position;
        ParseError::new(ParseErrorKind::Lex(err), position)
    }
}
