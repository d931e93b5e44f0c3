//! The `run` command: load a script and its imports, then execute it.

use std::io::Write;
use std::path::PathBuf;

use bir_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use bir_eval::{Engine, EngineConfig, EvalError, IoHandlerImpl, DEFAULT_STDLIB_DIR};
use tracing::debug;

use super::{read_file, stderr_emitter};

/// Overrides the standard-library directory.
pub const STDLIB_ENV: &str = "BIR_STDLIB";

/// `BIR_STDLIB` if set and non-empty, else `./bir`.
pub fn stdlib_dir() -> PathBuf {
    std::env::var_os(STDLIB_ENV)
        .filter(|dir| !dir.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_STDLIB_DIR), PathBuf::from)
}

/// Run a script file, exiting 1 with a rendered diagnostic on any error.
pub fn run_file(path: &str) {
    let content = read_file(path);
    let config = EngineConfig {
        stdlib_dir: stdlib_dir(),
        ..EngineConfig::default()
    };
    debug!(path, stdlib = %config.stdlib_dir.display(), "running script");

    if let Err(err) = run_source(path, content.clone(), config, IoHandlerImpl::stdio()) {
        render_error(stderr_emitter(), &err, path, &content);
        std::process::exit(1);
    }
}

/// Initialize and run `source` as if read from `path`.
pub fn run_source(
    path: &str,
    source: String,
    config: EngineConfig,
    handler: IoHandlerImpl,
) -> Result<Engine, EvalError> {
    let mut engine = Engine::builder(source)
        .path(path)
        .config(config)
        .io_handler(handler)
        .build();
    engine.init()?;
    engine.run()?;
    Ok(engine)
}

/// Render `err` against the file it happened in.
///
/// Errors raised inside an imported module carry that module's source and
/// path in their report; `path` and `source` are used only when no report
/// was attached.
pub fn render_error<W: Write>(emitter: TerminalEmitter<W>, err: &EvalError, path: &str, source: &str) -> W {
    let (path, source) = match err.report.as_deref() {
        Some(report) => (report.path.as_str(), report.content.as_str()),
        None => (path, source),
    };
    let mut emitter = emitter.with_source(source).with_file_path(path);
    emitter.emit(&err.to_diagnostic());
    emitter.flush();
    emitter.into_inner()
}
