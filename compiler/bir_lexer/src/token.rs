use std::fmt;

use bir_ir::{ConditionOp, Position, ScopeMutaterKind};

/// A cooked token with its source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Any numeric literal, already converted.
    Int(i64),
    /// String literal with escapes resolved.
    Str(String),
    /// Identifier. `negative` is set when the name was written as `-name`.
    Ident {
        name: String,
        negative: bool,
    },
    /// `# ...`, text without the leading `#`.
    Comment(String),
    Mutater(ScopeMutaterKind),
    Condition(ConditionOp),

    // Keywords
    Use,
    Const,
    Let,
    Init,
    Return,
    Throw,
    Implements,
    If,
    Elif,
    Else,
    Switch,
    Default,
    For,
    While,
    As,
    Case,
    Log,

    // Punctuation
    Colon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Apostrophe,
    Percent,
    Eq,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    Eof,
}

impl TokenKind {
    /// Short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(value) => format!("number `{value}`"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Ident { name, negative } => {
                let sign = if *negative { "-" } else { "" };
                format!("identifier `{sign}{name}`")
            }
            TokenKind::Comment(_) => "comment".to_string(),
            TokenKind::Mutater(kind) => format!("`{}`", kind.keyword()),
            TokenKind::Condition(op) => format!("`{}`", op.as_symbol()),
            TokenKind::Eof => "end of file".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    /// Source spelling of keywords, punctuation and operators.
    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::Use => "use",
            TokenKind::Const => "const",
            TokenKind::Let => "let",
            TokenKind::Init => "init",
            TokenKind::Return => "return",
            TokenKind::Throw => "throw",
            TokenKind::Implements => "implements",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Default => "default",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::As => "as",
            TokenKind::Case => "case",
            TokenKind::Log => "log",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Apostrophe => "'",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::Int(_)
            | TokenKind::Str(_)
            | TokenKind::Ident { .. }
            | TokenKind::Comment(_)
            | TokenKind::Mutater(_)
            | TokenKind::Condition(_)
            | TokenKind::Eof => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
