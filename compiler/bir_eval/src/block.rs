//! Runtime blocks.
//!
//! A block is the language's callable: a function with optional persistent
//! state (`instance`) built once by its `init` section. Blocks are either
//! interpreted (a parsed body) or native (a host function).

use std::fmt;

use bir_ir::{BlockBody, BlockDecl, Identifier, Statements};

use crate::engine::EngineId;
use crate::errors::EvalResult;
use crate::interface::Interface;
use crate::scope::{LocalScope, ScopeRef};

/// What a native block sees of the running engine.
pub struct NativeContext<'a> {
    /// The engine that owns the native block.
    pub engine: EngineId,
    pub interface: &'a LocalScope<Interface>,
}

/// Host function behind a native block. Receives evaluated verbs and args.
pub type NativeFn = fn(&mut NativeContext<'_>, &[i64], &[i64]) -> EvalResult<i64>;

#[derive(Clone)]
pub enum BlockKind {
    Interpreted(BlockBody),
    Native(NativeFn),
}

impl fmt::Debug for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Interpreted(body) => f.debug_tuple("Interpreted").field(body).finish(),
            BlockKind::Native(_) => f.write_str("Native"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Block {
    /// Engine whose source declared the block.
    pub owner: EngineId,
    pub name: String,
    pub verbs: Vec<Identifier>,
    pub args: Vec<Identifier>,
    pub kind: BlockKind,
    /// Name of the super-block for `implements` declarations.
    pub implements: Option<String>,
    pub initialized: bool,
    /// State shared by every call, created once on declaration.
    pub instance: Option<ScopeRef>,
}

impl Block {
    /// An uninitialized block for a declaration with a body.
    pub fn declared(owner: EngineId, decl: &BlockDecl, body: BlockBody) -> Self {
        Block {
            owner,
            name: decl.name.value.clone(),
            verbs: decl.verbs.clone(),
            args: decl.args.clone(),
            kind: BlockKind::Interpreted(body),
            implements: None,
            initialized: false,
            instance: None,
        }
    }

    /// A block implementing `parent`: shape and body are copied, state is not.
    pub fn implementing(owner: EngineId, name: &str, parent: &Block) -> Self {
        Block {
            owner,
            name: name.to_string(),
            verbs: parent.verbs.clone(),
            args: parent.args.clone(),
            kind: parent.kind.clone(),
            implements: Some(parent.name.clone()),
            initialized: false,
            instance: None,
        }
    }

    pub fn native(owner: EngineId, name: &str, host: NativeFn) -> Self {
        Block {
            owner,
            name: name.to_string(),
            verbs: Vec::new(),
            args: Vec::new(),
            kind: BlockKind::Native(host),
            implements: None,
            initialized: true,
            instance: None,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, BlockKind::Native(_))
    }

    pub fn init(&self) -> Option<&Statements> {
        match &self.kind {
            BlockKind::Interpreted(body) => body.init.as_ref(),
            BlockKind::Native(_) => None,
        }
    }
}
