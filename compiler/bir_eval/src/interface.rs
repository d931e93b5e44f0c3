//! The native `bir` block: byte-level I/O for scripts.
//!
//! `bir:<opcode>(args...)` selects an operation with its first verb. Output
//! bytes collect in a buffer until `Output` flushes them through the
//! handler; `Input` replaces the input buffer with one line, which `Pull`
//! then hands out byte by byte.
//!
//! One [`Interface`] is shared by every engine of a run, so a module and its
//! importer see the same buffers.

use std::collections::VecDeque;

use tracing::trace;

use crate::block::NativeContext;
use crate::errors::{argument_count_mismatch, io_failure, EvalResult};
use crate::io_handler::IoHandlerImpl;

/// Name the interface block is registered under.
pub const INTERFACE_BLOCK: &str = "bir";

/// Opcodes understood by the interface block, selected by `verbs[0]`.
pub mod opcode {
    pub const READ: i64 = 4_206_900;
    pub const PUSH: i64 = 4_206_901;
    pub const ASSIGN: i64 = 4_206_902;
    pub const POP: i64 = 4_206_903;
    pub const DUMP: i64 = 4_206_904;
    pub const LENGTH: i64 = 4_206_905;
    pub const WRITE: i64 = 4_206_906;
    pub const UPDATE: i64 = 4_206_907;
    pub const INPUT: i64 = 4_206_908;
    pub const OUTPUT: i64 = 4_206_909;
    /// Returned by `PULL` once the input buffer is drained.
    pub const DONE: i64 = 4_206_910;
    pub const UNKNOWN: i64 = 4_206_911;
    pub const DELETE: i64 = 4_206_912;
    pub const PULL: i64 = 4_206_913;
}

/// Buffers and handler behind the interface block.
#[derive(Debug, Default)]
pub struct Interface {
    input: VecDeque<u8>,
    output: Vec<u8>,
    handler: IoHandlerImpl,
}

impl Interface {
    pub fn new(handler: IoHandlerImpl) -> Self {
        Interface {
            input: VecDeque::new(),
            output: Vec::new(),
            handler,
        }
    }

    pub fn handler(&self) -> &IoHandlerImpl {
        &self.handler
    }

    /// Bytes pushed but not yet flushed.
    pub fn pending_output(&self) -> &[u8] {
        &self.output
    }

    fn push(&mut self, value: i64) {
        self.output.push(value.to_le_bytes()[0]);
    }

    fn pull(&mut self) -> i64 {
        self.input
            .pop_front()
            .map_or(opcode::DONE, i64::from)
    }

    fn input(&mut self) -> std::io::Result<()> {
        let mut line = self.handler.read_line()?;
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        self.input = line.into();
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let bytes = std::mem::take(&mut self.output);
        self.handler.write(&bytes)
    }
}

/// Host function of the `bir` block.
///
/// Unknown or missing opcodes return 0.
pub fn interface_block(ctx: &mut NativeContext<'_>, verbs: &[i64], args: &[i64]) -> EvalResult<i64> {
    let Some(&op) = verbs.first() else {
        return Ok(0);
    };
    trace!(engine = ?ctx.engine, op, ?args, "native interface");

    let mut interface = ctx.interface.borrow_mut();
    match op {
        opcode::PUSH => {
            let Some(&value) = args.first() else {
                return Err(argument_count_mismatch(
                    INTERFACE_BLOCK,
                    vec!["push expects 1 argument, found 0".to_string()],
                ));
            };
            interface.push(value);
            Ok(value)
        }
        opcode::PULL => Ok(interface.pull()),
        opcode::INPUT => {
            interface.input().map_err(|err| io_failure(&err))?;
            Ok(0)
        }
        opcode::OUTPUT => {
            interface.flush().map_err(|err| io_failure(&err))?;
            Ok(args.first().copied().unwrap_or(0))
        }
        _ => Ok(0),
    }
}
