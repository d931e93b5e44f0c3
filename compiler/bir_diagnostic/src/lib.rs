//! Diagnostic system for Bir error reporting.
//!
//! Every error the interpreter can produce is fatal, so a diagnostic is
//! rendered once and the process exits. A rendered diagnostic carries:
//! - an error code for searchability
//! - the message
//! - the position, shown as the source line with a caret under the column
//! - the call-stack frame names active when the error was raised
//! - the path of the file the position refers to

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
