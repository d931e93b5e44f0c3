//! Bir Eval - tree-walking evaluator for Bir programs.
//!
//! # Architecture
//!
//! - `Engine`: runs one source file; imports get engines of their own
//! - `Scope`: bindings and blocks, with a parent list instead of a single
//!   parent so a scope can see both a block instance and its caller
//! - `CallStack`: named frames, bounded by the configured maximum
//! - `Interface`: the native `bir` block and its byte stacks
//! - `IoHandlerImpl`: stdin/stdout, or in-memory buffers for tests
//!
//! Every value is an `i64`; there is no other runtime type.

mod block;
mod callstack;
mod engine;
pub mod errors;
mod interface;
mod io_handler;
pub mod module_loader;
pub mod operators;
mod scope;

pub use block::{Block, BlockKind, NativeContext, NativeFn};
pub use callstack::{CallStack, Frame, MAIN_FRAME};
pub use engine::{
    Engine, EngineBuilder, EngineConfig, EngineId, DEFAULT_MAXIMUM_CALLSTACK_SIZE,
    DEFAULT_STDLIB_DIR,
};
pub use errors::{ErrorReport, EvalError, EvalErrorKind, EvalResult};
pub use interface::{interface_block, opcode, Interface, INTERFACE_BLOCK};
pub use io_handler::{BufferIoHandler, IoHandlerImpl, StdioHandler, MAX_LINE};
pub use scope::{
    Binding, BlockRef, FoundBlock, LocalScope, Scope, ScopeRef, UpdateOutcome,
};
