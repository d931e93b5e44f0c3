//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};
use std::path::Path;

use crate::{Diagnostic, Severity};

use super::{snippet, DiagnosticEmitter};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const CARET: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// The source text and file path are per-emitter: a runtime error raised in
/// an imported module is rendered with an emitter built for that module.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
    file_path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Source text used to render the snippet under the header.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Path printed in the header and the `File:` trailer.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn file_name(&self) -> Option<String> {
        let path = self.file_path.as_deref()?;
        let name = Path::new(path)
            .file_name()
            .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
        Some(name)
    }

    fn write_snippet(&mut self, line: u32, col: u32) {
        let Some(rendered) = self
            .source
            .as_deref()
            .and_then(|source| snippet(source, line, col))
        else {
            return;
        };
        let (text, caret) = rendered.split_once('\n').unwrap_or((rendered.as_str(), ""));
        let _ = writeln!(self.writer, "{text}");
        self.write_colored(caret, colors::CARET);
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message at file line:col
        self.write_severity(diagnostic.severity);
        if self.colors {
            let _ = write!(
                self.writer,
                "{}[{}]{}",
                colors::BOLD,
                diagnostic.code,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "[{}]", diagnostic.code);
        }
        let _ = write!(self.writer, ": {}", diagnostic.message);
        if let Some(position) = diagnostic.position {
            match self.file_name() {
                Some(name) => {
                    let _ = write!(self.writer, " at {name} {position}");
                }
                None => {
                    let _ = write!(self.writer, " at {position}");
                }
            }
        }
        let _ = writeln!(self.writer);

        if let Some(position) = diagnostic.position {
            self.write_snippet(position.line, position.col);
        }

        if !diagnostic.callstack.is_empty() {
            let _ = writeln!(self.writer, "Callstack:");
            for frame in &diagnostic.callstack {
                let _ = writeln!(self.writer, "\t-> {frame} ()");
            }
        }

        if let Some(path) = self.file_path.clone() {
            let _ = writeln!(self.writer, "File:\n\t{path}");
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
