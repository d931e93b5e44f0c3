//! Runtime errors.
//!
//! Every failure the engine can detect is an [`EvalErrorKind`]. Errors are
//! never recovered inside the language: they unwind with `?` to whoever called
//! [`Engine::run`](crate::Engine::run). On the way out, the engine that owns
//! the failing source attaches an [`ErrorReport`] so the driver can render
//! the snippet and call stack.

use bir_diagnostic::{Diagnostic, ErrorCode};
use bir_ir::Position;
use bir_parse::ParseError;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// The program text of the running engine failed to parse.
    #[error(transparent)]
    Syntax(ParseError),
    #[error("`{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("undefined reference `{name}`")]
    UndefinedReference { name: String },
    #[error("undefined block `{name}`")]
    UndefinedBlock { name: String },
    #[error("wrong number of arguments for `{block}`: {}", .mismatches.join(", "))]
    ArgumentCountMismatch {
        block: String,
        mismatches: Vec<String>,
    },
    #[error("cannot reassign const `{name}`")]
    ConstReassignment { name: String },
    #[error("cannot reassign `{name}` through an immutable scope")]
    ImmutableScopeReassignment { name: String },
    #[error("maximum call stack size of {limit} exceeded")]
    CallStackOverflow { limit: usize },
    #[error("`{keyword}` is not allowed in the main program")]
    TopLevelControlFlowMisuse { keyword: &'static str },
    #[error("uncaught throw of {value}")]
    UserThrow { value: i64 },
    #[error("module `{name}` not found in `{dir}`")]
    MissingModule { name: String, dir: String },
    #[error("`{mutater}` found no enclosing block instance")]
    MissingScopeInstance { mutater: &'static str },
    #[error("`{block}` has no slot `{slot}`")]
    MissingSlot { block: String, slot: String },
    #[error("{reason} in `{op}`")]
    ArithmeticFault { op: &'static str, reason: &'static str },
    #[error("expected an integer, found a {found}")]
    NotAnInteger { found: &'static str },
    #[error("cyclic import of `{name}` ({chain})")]
    CyclicImport { name: String, chain: String },
    #[error("failed to load module `{name}`: {reason}")]
    ModuleLoad { name: String, reason: String },
    #[error("native interface I/O failed: {reason}")]
    Io { reason: String },
}

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::Syntax(err) => err.code(),
            EvalErrorKind::DuplicateDeclaration { .. } => ErrorCode::E6001,
            EvalErrorKind::UndefinedReference { .. } => ErrorCode::E6002,
            EvalErrorKind::UndefinedBlock { .. } => ErrorCode::E6003,
            EvalErrorKind::ArgumentCountMismatch { .. } => ErrorCode::E6004,
            EvalErrorKind::ConstReassignment { .. } => ErrorCode::E6005,
            EvalErrorKind::ImmutableScopeReassignment { .. } => ErrorCode::E6006,
            EvalErrorKind::CallStackOverflow { .. } => ErrorCode::E6007,
            EvalErrorKind::TopLevelControlFlowMisuse { .. } => ErrorCode::E6008,
            EvalErrorKind::UserThrow { .. } => ErrorCode::E6009,
            EvalErrorKind::MissingModule { .. } => ErrorCode::E6010,
            EvalErrorKind::MissingScopeInstance { .. } => ErrorCode::E6011,
            EvalErrorKind::MissingSlot { .. } => ErrorCode::E6012,
            EvalErrorKind::ArithmeticFault { .. } => ErrorCode::E6013,
            EvalErrorKind::NotAnInteger { .. } => ErrorCode::E6014,
            EvalErrorKind::CyclicImport { .. } => ErrorCode::E6015,
            EvalErrorKind::ModuleLoad { .. } => ErrorCode::E6016,
            EvalErrorKind::Io { .. } => ErrorCode::E6017,
        }
    }
}

/// Context captured by the engine that owns the failing source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    pub filename: String,
    pub path: String,
    /// Frame names, outermost first.
    pub callstack: Vec<String>,
    pub content: String,
}

/// A runtime error with its source position and report context.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub position: Option<Position>,
    pub report: Option<Box<ErrorReport>>,
}

pub type EvalResult<T = i64> = Result<T, EvalError>;

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
            report: None,
        }
    }

    /// Record where the error happened.
    ///
    /// Only the first (innermost) position sticks, so callers can tag errors
    /// on the way out without hiding the precise location.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        if self.position.is_none() && !position.is_synthetic() {
            self.position = Some(position);
        }
        self
    }

    /// Attach the owning engine's report. The innermost report wins.
    #[must_use]
    pub fn with_report(mut self, report: impl FnOnce() -> ErrorReport) -> Self {
        if self.report.is_none() {
            self.report = Some(Box::new(report()));
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        if let Some(position) = self.position {
            diagnostic = diagnostic.at(position);
        }
        if let Some(report) = &self.report {
            diagnostic = diagnostic.with_callstack(report.callstack.clone());
        }
        match &self.kind {
            EvalErrorKind::CallStackOverflow { .. } => {
                diagnostic.with_note("check for a block that calls itself without a base case")
            }
            EvalErrorKind::ImmutableScopeReassignment { .. } => {
                diagnostic.with_note("bindings of an imported module are read-only")
            }
            _ => diagnostic,
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        let position = err.position;
        EvalError::from_kind(EvalErrorKind::Syntax(err)).at(position)
    }
}

#[cold]
pub fn duplicate_declaration(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDeclaration {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedReference {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_block(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedBlock {
        name: name.to_string(),
    })
}

#[cold]
pub fn argument_count_mismatch(block: &str, mismatches: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCountMismatch {
        block: block.to_string(),
        mismatches,
    })
}

#[cold]
pub fn const_reassignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstReassignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn immutable_scope_reassignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableScopeReassignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn callstack_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallStackOverflow { limit })
}

#[cold]
pub fn top_level_control_flow(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TopLevelControlFlowMisuse { keyword })
}

#[cold]
pub fn user_throw(value: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UserThrow { value })
}

#[cold]
pub fn missing_module(name: &str, dir: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingModule {
        name: name.to_string(),
        dir: dir.to_string(),
    })
}

#[cold]
pub fn missing_scope_instance(mutater: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingScopeInstance { mutater })
}

#[cold]
pub fn missing_slot(block: &str, slot: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingSlot {
        block: block.to_string(),
        slot: slot.to_string(),
    })
}

#[cold]
pub fn arithmetic_fault(op: &'static str, reason: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArithmeticFault { op, reason })
}

#[cold]
pub fn not_an_integer(found: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnInteger { found })
}

#[cold]
pub fn cyclic_import(name: &str, chain: &[String]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicImport {
        name: name.to_string(),
        chain: chain.join(" -> "),
    })
}

#[cold]
pub fn module_load(name: &str, reason: impl ToString) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuleLoad {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn io_failure(err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        reason: err.to_string(),
    })
}
