//! Command handlers for the `bir` binary.
//!
//! Handlers that can fail print a rendered diagnostic to stderr and exit with
//! status 1. Shared helpers (reading files, building emitters) live here.

use std::io::{self, IsTerminal, Write};

use bir_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use bir_diagnostic::{Diagnostic, ErrorCode};

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{render_error, run_file, run_source, stdlib_dir, STDLIB_ENV};

/// Read a script, describing the failure as an E9002 diagnostic.
pub fn read_source(path: &str) -> Result<String, Diagnostic> {
    std::fs::read_to_string(path).map_err(|err| {
        let message = match err.kind() {
            io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {err}"),
        };
        Diagnostic::error(ErrorCode::E9002).with_message(message)
    })
}

/// Read a script or exit 1.
pub(crate) fn read_file(path: &str) -> String {
    match read_source(path) {
        Ok(content) => content,
        Err(diagnostic) => fail(&diagnostic),
    }
}

/// Emitter for stderr, colored when stderr is a terminal.
pub(crate) fn stderr_emitter() -> TerminalEmitter<io::Stderr> {
    TerminalEmitter::stderr(ColorMode::Auto, io::stderr().is_terminal())
}

/// Print a diagnostic with no source context and exit 1.
pub fn fail(diagnostic: &Diagnostic) -> ! {
    let mut emitter = stderr_emitter();
    emitter.emit(diagnostic);
    emitter.flush();
    let _ = io::stdout().flush();
    std::process::exit(1);
}
