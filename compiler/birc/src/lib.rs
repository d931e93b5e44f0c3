//! Bir CLI library.
//!
//! The `bir` binary is a thin argument parser over this crate. Everything it
//! does (logging setup, running a script, rendering errors) lives here so
//! integration tests can drive it without spawning a process.
//!
//! # Environment
//!
//! - `BIR_STDLIB`: directory searched by `use "name"` (default `./bir`)
//! - `BIR_LOG`: tracing filter directives, falling back to `RUST_LOG`
//! - `BIR_LOG_TREE`: render spans as an indented tree

pub mod commands;
pub mod tracing_setup;

pub use tracing_setup::init_tracing;
