//! Front-end phase tests.
//!
//! - `lexer` - token positions and literal forms
//! - `parser` - program shape as the engine consumes it

mod lexer;
mod parser;
