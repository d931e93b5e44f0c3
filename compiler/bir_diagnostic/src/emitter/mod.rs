//! Diagnostic Emitters
//!
//! Only one output format exists: the terminal emitter, which renders the
//! message, a source snippet with a caret, the call-stack trace and the file
//! path.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Source line `line` (1-based) with a caret line under column `col`.
///
/// Returns `None` when the line does not exist in `source`.
pub fn snippet(source: &str, line: u32, col: u32) -> Option<String> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    let text = source.lines().nth(index)?;
    let pad = usize::try_from(col.saturating_sub(1)).ok()?;
    Some(format!("{text}\n{}^", " ".repeat(pad)))
}
