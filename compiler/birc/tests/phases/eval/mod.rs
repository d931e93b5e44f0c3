//! Interpreter phase tests.
//!
//! - `programs` - complete scripts and their output
//! - `rendering` - runtime errors as the CLI prints them
//! - `modules` - standard-library imports and file loading

mod modules;
mod programs;
mod rendering;
