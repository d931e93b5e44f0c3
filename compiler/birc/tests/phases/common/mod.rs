//! Shared helpers for phase tests.

use std::path::Path;

use bir_diagnostic::emitter::{ColorMode, TerminalEmitter};
use bir_eval::{BufferIoHandler, Engine, EngineConfig, EvalError, IoHandlerImpl};
use birc::commands::{render_error, run_source};

/// Path scripts are run under.
pub const SCRIPT: &str = "main.bir";

/// Run `source` with captured output and no input.
pub fn run(source: &str) -> Result<Engine, EvalError> {
    run_source(SCRIPT, source.to_string(), EngineConfig::default(), IoHandlerImpl::buffer())
}

/// Run `source` with scripted input lines.
pub fn run_with_input(source: &str, lines: &[&str]) -> Result<Engine, EvalError> {
    let handler = IoHandlerImpl::Buffer(BufferIoHandler::with_input(lines.iter().copied()));
    run_source(SCRIPT, source.to_string(), EngineConfig::default(), handler)
}

/// Run `source` with `dir` as the standard library.
pub fn run_in(dir: &Path, source: &str) -> Result<Engine, EvalError> {
    let config = EngineConfig {
        stdlib_dir: dir.to_path_buf(),
        ..EngineConfig::default()
    };
    run_source(SCRIPT, source.to_string(), config, IoHandlerImpl::buffer())
}

/// Render `err` the way the CLI does, without colors.
pub fn render(err: &EvalError, source: &str) -> String {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    String::from_utf8(render_error(emitter, err, SCRIPT, source)).unwrap()
}
