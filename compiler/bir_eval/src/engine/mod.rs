//! The execution engine.
//!
//! One `Engine` runs one source file. It owns a call stack of executing
//! statement sequences and a scope stack whose top is the current scope.
//! Each `use` import is loaded into its own engine, run to completion, and
//! kept in `uses`; its top scope becomes a read-only parent of the
//! importer's root scope.
//!
//! # Layout
//!
//! - `exec`: frames and statements
//! - `expr`: expression evaluation
//! - `call`: block invocation and scope mutaters
//! - `declare`: block declaration, inheritance and `init`
//! - `bridge`: delegating calls to the engine that owns a foreign block
//! - `imports`: loading `use` imports

mod bridge;
mod call;
mod declare;
mod exec;
mod expr;
mod imports;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bir_ir::Program;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::block::Block;
use crate::callstack::{CallStack, Frame, MAIN_FRAME};
use crate::errors::{ErrorReport, EvalError, EvalResult};
use crate::interface::{interface_block, Interface, INTERFACE_BLOCK};
use crate::io_handler::IoHandlerImpl;
use crate::module_loader::canonical;
use crate::scope::{LocalScope, Scope, ScopeRef};

/// Call depth at which recursion is cut off.
pub const DEFAULT_MAXIMUM_CALLSTACK_SIZE: usize = 8000;

/// Standard-library directory, relative to the working directory.
pub const DEFAULT_STDLIB_DIR: &str = "bir";

/// Identity of one engine within a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(u32);

impl EngineId {
    /// The first engine created in a run.
    pub const ROOT: EngineId = EngineId(0);
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub maximum_callstack_size: usize,
    /// Where `use "name"` looks for `name.*`.
    pub stdlib_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            maximum_callstack_size: DEFAULT_MAXIMUM_CALLSTACK_SIZE,
            stdlib_dir: PathBuf::from(DEFAULT_STDLIB_DIR),
        }
    }
}

/// State shared by every engine of one run.
#[derive(Debug)]
struct Runtime {
    config: EngineConfig,
    interface: LocalScope<Interface>,
    next_id: Cell<u32>,
    /// Files whose imports are being loaded, outermost first.
    loading: RefCell<Vec<PathBuf>>,
}

impl Runtime {
    fn fresh_id(&self) -> EngineId {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        EngineId(id)
    }
}

/// Builder for the root engine of a run.
///
/// ```text
/// let mut engine = EngineBuilder::new(source)
///     .path("main.bir")
///     .stdlib_dir("lib")
///     .io_handler(IoHandlerImpl::buffer())
///     .build();
/// engine.init()?;
/// engine.run()?;
/// ```
#[derive(Debug)]
pub struct EngineBuilder {
    source: String,
    path: PathBuf,
    config: EngineConfig,
    handler: IoHandlerImpl,
}

impl EngineBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        EngineBuilder {
            source: source.into(),
            path: PathBuf::from("<memory>"),
            config: EngineConfig::default(),
            handler: IoHandlerImpl::default(),
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn maximum_callstack_size(mut self, size: usize) -> Self {
        self.config.maximum_callstack_size = size;
        self
    }

    #[must_use]
    pub fn stdlib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.stdlib_dir = dir.into();
        self
    }

    #[must_use]
    pub fn io_handler(mut self, handler: IoHandlerImpl) -> Self {
        self.handler = handler;
        self
    }

    pub fn build(self) -> Engine {
        let runtime = Rc::new(Runtime {
            config: self.config,
            interface: LocalScope::new(Interface::new(self.handler)),
            next_id: Cell::new(EngineId::ROOT.0),
            loading: RefCell::new(Vec::new()),
        });
        Engine::with_runtime(self.source, self.path, runtime)
    }
}

pub struct Engine {
    id: EngineId,
    path: PathBuf,
    filename: String,
    content: String,
    program: Program,
    callstack: CallStack,
    /// Never empty: the root scope stays at the bottom.
    scopestack: Vec<ScopeRef>,
    root: ScopeRef,
    uses: FxHashMap<EngineId, Engine>,
    runtime: Rc<Runtime>,
}

impl Engine {
    pub fn builder(source: impl Into<String>) -> EngineBuilder {
        EngineBuilder::new(source)
    }

    fn with_runtime(content: String, path: PathBuf, runtime: Rc<Runtime>) -> Self {
        let filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        let root = LocalScope::new(Scope::new());
        Engine {
            id: runtime.fresh_id(),
            path,
            filename,
            content,
            program: Program::default(),
            callstack: CallStack::new(Some(runtime.config.maximum_callstack_size)),
            scopestack: vec![root.clone()],
            root,
            uses: FxHashMap::default(),
            runtime,
        }
    }

    /// Parse the source, register the `bir` interface block and load every
    /// import.
    #[tracing::instrument(level = "debug", skip_all, fields(engine = %self.id, file = %self.filename))]
    pub fn init(&mut self) -> EvalResult<()> {
        self.program = bir_parse::parse(&self.content)
            .map_err(|err| self.attach_report(EvalError::from(err)))?;

        self.root.borrow_mut().add_block(LocalScope::new(Block::native(
            self.id,
            INTERFACE_BLOCK,
            interface_block,
        )));

        let imports = self.program.imports.clone();
        if imports.is_empty() {
            return Ok(());
        }
        self.runtime
            .loading
            .borrow_mut()
            .push(canonical(&self.path));
        let mut result = Ok(());
        for import in &imports {
            if let Err(err) = self.load_import(import) {
                result = Err(self.attach_report(err.at(import.position)));
                break;
            }
        }
        self.runtime.loading.borrow_mut().pop();
        result
    }

    /// Execute the main program to completion.
    pub fn run(&mut self) -> EvalResult<()> {
        debug!(engine = %self.id, file = %self.filename, "run");
        let statements = self.program.statements.clone();
        self.enter(Frame::new(MAIN_FRAME, statements), false)?;
        Ok(())
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn config(&self) -> &EngineConfig {
        &self.runtime.config
    }

    /// Look a name up from the root scope.
    pub fn global(&self, name: &str) -> Option<i64> {
        self.root.borrow().find(name)
    }

    /// Engines loaded by this engine's imports.
    pub fn uses(&self) -> impl Iterator<Item = &Engine> {
        self.uses.values()
    }

    /// Output captured by a buffer I/O handler.
    pub fn output(&self) -> String {
        self.runtime.interface.borrow().handler().output()
    }

    fn current_scope(&self) -> ScopeRef {
        self.scopestack
            .last()
            .cloned()
            .unwrap_or_else(|| self.root.clone())
    }

    /// Run `f` with `scope` pushed as the current scope.
    fn with_scope<T>(
        &mut self,
        scope: ScopeRef,
        f: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        self.scopestack.push(scope);
        let result = f(self);
        self.scopestack.pop();
        result
    }

    fn attach_report(&self, err: EvalError) -> EvalError {
        err.with_report(|| ErrorReport {
            filename: self.filename.clone(),
            path: self.path.display().to_string(),
            callstack: self.callstack.capture(),
            content: self.content.clone(),
        })
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("depth", &self.callstack.depth())
            .field("scopes", &self.scopestack.len())
            .field("uses", &self.uses.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
