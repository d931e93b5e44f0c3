//! Call stack of executing statement sequences.
//!
//! Every executing sequence owns a frame: the main program, each block call,
//! each taken branch and each loop iteration. Frame names feed error
//! reports and scope-mutater resolution. The depth limit is checked only
//! when a block call or `init` pushes its frame.

use bir_ir::Statements;

use crate::errors::{callstack_overflow, EvalResult};

/// Name of the main program frame.
pub const MAIN_FRAME: &str = "<main>";

#[derive(Clone, Debug)]
pub struct Frame {
    pub name: String,
    pub statements: Statements,
}

impl Frame {
    pub fn new(name: impl Into<String>, statements: Statements) -> Self {
        Frame {
            name: name.into(),
            statements,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
    max_depth: Option<usize>,
}

impl CallStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a block-call frame, checking the depth limit first.
    ///
    /// The frame is not pushed on overflow.
    pub fn push_call(&mut self, frame: Frame) -> EvalResult<()> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(callstack_overflow(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Push a control-flow frame. Not subject to the depth limit.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether no block call or init is executing.
    ///
    /// Control-flow frames and the main frame are named `<...>`; block frames
    /// never are.
    pub fn outside_blocks(&self) -> bool {
        self.frames.iter().all(|frame| frame.name.starts_with('<'))
    }

    /// Frame names, innermost first.
    pub fn names_innermost_first(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().rev().map(|frame| frame.name.as_str())
    }

    /// Frame names, outermost first.
    pub fn capture(&self) -> Vec<String> {
        self.frames.iter().map(|frame| frame.name.clone()).collect()
    }
}
