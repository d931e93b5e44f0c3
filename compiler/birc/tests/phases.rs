// Test code uses unwrap for clarity; panics give good failure messages
#![allow(clippy::unwrap_used)]

//! Phase-based tests for the whole interpreter.
//!
//! Unit tests inside each crate cover one component at a time. These drive
//! the public surface (`bir_lexer::lex`, `bir_parse::parse`, the `birc`
//! command helpers) the way the `bir` binary does.
//!
//! # Organization
//!
//! - `parse/` - lexer and parser tests (`bir_lexer`, `bir_parse`)
//! - `eval/` - running scripts and rendering their errors (`bir_eval`, `birc`)
//! - `common/` - shared helpers
//!
//! # Running Phase Tests
//!
//! ```bash
//! cargo test -p birc --test phases
//! cargo test -p birc --test phases eval
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;
