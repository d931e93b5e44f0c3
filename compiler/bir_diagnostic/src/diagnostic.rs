use std::fmt;

use bir_ir::Position;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A fully described error, ready for an emitter.
///
/// Built with the `with_*` methods:
///
/// ```text
/// Diagnostic::error(ErrorCode::E6002)
///     .with_message("undefined reference `x`")
///     .at(Position::new(3, 5))
///     .with_callstack(vec!["<main>".into(), "counter".into()])
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub position: Option<Position>,
    /// Frame names, outermost first.
    pub callstack: Vec<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic with the given code and no message.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            position: None,
            callstack: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the source position. Synthetic positions are ignored.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        if !position.is_synthetic() {
            self.position = Some(position);
        }
        self
    }

    #[must_use]
    pub fn with_callstack(mut self, callstack: Vec<String>) -> Self {
        self.callstack = callstack;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}
