//! Bir IR - the syntax tree shared by the parser and the engine.
//!
//! Every node carries a [`Position`] so that runtime errors can point back at
//! the source line that produced them.
//!
//! # Layout
//!
//! - `position`: 1-based line/column pairs
//! - `ops`: closed operator enums (arithmetic, condition, quantity, mutater)
//! - `ast`: `Program`, `Statement`, `Expression` and block declarations

mod ast;
mod ops;
mod position;

pub use ast::{
    BlockBody, BlockCall, BlockDecl, CaseArm, ConditionalArm, Expression, Identifier, Primitive,
    Program, Statement, Statements, UseImport, VariableKind,
};
pub use ops::{ArithmeticOp, ConditionOp, QuantityOp, ScopeMutaterKind};
pub use position::Position;
