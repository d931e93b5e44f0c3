use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E6xxx: Runtime errors
/// - E9xxx: Driver errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Invalid number literal
    E0002,
    /// Unterminated or malformed string literal
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,

    // Runtime Errors (E6xxx)
    /// Duplicate declaration in one scope
    E6001,
    /// Undefined reference
    E6002,
    /// Undefined block
    E6003,
    /// Argument count mismatch
    E6004,
    /// Reassignment of a `const` binding
    E6005,
    /// Reassignment through an immutable (imported) scope
    E6006,
    /// Call stack overflow
    E6007,
    /// `return`/`throw` in the main program frame
    E6008,
    /// Value thrown by user code
    E6009,
    /// Module not found
    E6010,
    /// No instance scope for a scope mutater
    E6011,
    /// Instance slot not found
    E6012,
    /// Arithmetic fault (division by zero, invalid root, ...)
    E6013,
    /// Non-integer value used as an integer
    E6014,
    /// Cyclic `use`
    E6015,
    /// Imported module failed to load
    E6016,
    /// Native interface I/O failure
    E6017,

    // Driver Errors (E9xxx)
    /// Command-line usage error
    E9001,
    /// Unable to read a source file
    E9002,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E6001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E6014 => "E6014",
            ErrorCode::E6015 => "E6015",
            ErrorCode::E6016 => "E6016",
            ErrorCode::E6017 => "E6017",
            // Driver
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Check if this is a lexer or parser error.
    pub fn is_syntax_error(&self) -> bool {
        let code = self.as_str();
        code.starts_with("E0") || code.starts_with("E1")
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
