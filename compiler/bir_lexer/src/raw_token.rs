//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before literal
//! cooking and final token conversion.

use logos::Logos;

/// Raw token from logos (before cooking).
///
/// Newlines carry no meaning in Bir, so all whitespace is skipped.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[token("use")]
    Use,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("init")]
    Init,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("implements")]
    Implements,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("switch")]
    Switch,
    #[token("default")]
    Default,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("as")]
    As,
    #[token("case")]
    Case,
    #[token("log")]
    Log,

    #[token("$read")]
    ReadMutater,
    #[token("$write")]
    WriteMutater,
    #[token("$delete")]
    DeleteMutater,

    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("'")]
    Apostrophe,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,

    // `!` only exists as a prefix of a comparison sign.
    #[regex(r"!?(&&|\|\||<=|>=|<|>|==)")]
    Condition,

    // A leading `-` belongs to the literal (longest match), so `x-1` lexes
    // as `x` followed by `-1`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Decimal,
    #[regex(r"-?@b[01]+")]
    Binary,
    #[regex(r"-?@x[0-9a-fA-F]+")]
    Hex,
    #[regex(r"-?@o[0-7]+")]
    Octal,

    // Closing quote is optional here so an unterminated literal is reported
    // as such instead of as a stray `"`.
    #[regex(r#""([^\n\\"]|\\[^\n])*"?"#)]
    Str,

    #[regex(r"-?[a-zA-Z_][a-zA-Z_0-9]*")]
    Ident,
}
