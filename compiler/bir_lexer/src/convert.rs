//! Raw token to `TokenKind` conversion.
//!
//! Literals are cooked here: numbers are converted to `i64` and strings have
//! their escapes resolved.

use bir_ir::{ConditionOp, ScopeMutaterKind};

use crate::raw_token::RawToken;
use crate::{LexErrorKind, TokenKind};

pub(crate) fn convert(raw: RawToken, slice: &str) -> Result<TokenKind, LexErrorKind> {
    let kind = match raw {
        RawToken::Comment => TokenKind::Comment(slice[1..].to_string()),

        RawToken::Use => TokenKind::Use,
        RawToken::Const => TokenKind::Const,
        RawToken::Let => TokenKind::Let,
        RawToken::Init => TokenKind::Init,
        RawToken::Return => TokenKind::Return,
        RawToken::Throw => TokenKind::Throw,
        RawToken::Implements => TokenKind::Implements,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::Switch => TokenKind::Switch,
        RawToken::Default => TokenKind::Default,
        RawToken::For => TokenKind::For,
        RawToken::While => TokenKind::While,
        RawToken::As => TokenKind::As,
        RawToken::Case => TokenKind::Case,
        RawToken::Log => TokenKind::Log,

        RawToken::ReadMutater => TokenKind::Mutater(ScopeMutaterKind::Read),
        RawToken::WriteMutater => TokenKind::Mutater(ScopeMutaterKind::Write),
        RawToken::DeleteMutater => TokenKind::Mutater(ScopeMutaterKind::Delete),

        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,

        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Apostrophe => TokenKind::Apostrophe,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Eq => TokenKind::Eq,

        RawToken::Condition => match ConditionOp::from_symbol(slice) {
            Some(op) => TokenKind::Condition(op),
            None => return Err(LexErrorKind::InvalidCharacter(slice.to_string())),
        },

        RawToken::Decimal => TokenKind::Int(parse_decimal(slice)?),
        RawToken::Binary => TokenKind::Int(parse_radix(slice, 2)?),
        RawToken::Hex => TokenKind::Int(parse_radix(slice, 16)?),
        RawToken::Octal => TokenKind::Int(parse_radix(slice, 8)?),

        RawToken::Str => TokenKind::Str(cook_string(slice)?),

        RawToken::Ident => match slice.strip_prefix('-') {
            Some(name) => TokenKind::Ident {
                name: name.to_string(),
                negative: true,
            },
            None => TokenKind::Ident {
                name: slice.to_string(),
                negative: false,
            },
        },
    };
    Ok(kind)
}

/// Decimal literal. A fractional part is accepted and truncated.
fn parse_decimal(slice: &str) -> Result<i64, LexErrorKind> {
    let whole = slice.split_once('.').map_or(slice, |(whole, _)| whole);
    whole
        .parse::<i64>()
        .map_err(|_| LexErrorKind::NumberOverflow(slice.to_string()))
}

/// `@b`, `@x` or `@o` literal with an optional leading `-`.
fn parse_radix(slice: &str, radix: u32) -> Result<i64, LexErrorKind> {
    let (negative, rest) = match slice.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, slice),
    };
    // Skip the two-character `@b`/`@x`/`@o` marker.
    let digits = rest.get(2..).unwrap_or_default();
    let magnitude = i64::from_str_radix(digits, radix)
        .map_err(|_| LexErrorKind::NumberOverflow(slice.to_string()))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Strip the quotes and resolve escapes.
fn cook_string(slice: &str) -> Result<String, LexErrorKind> {
    let inner = slice
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(LexErrorKind::UnterminatedString)?;
    // `"abc\"` matches with the closing quote consumed by the escape.
    if slice.len() < 2 || ends_with_escaped_quote(slice) {
        return Err(LexErrorKind::UnterminatedString);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some(other) => return Err(LexErrorKind::InvalidEscape(other)),
            None => return Err(LexErrorKind::UnterminatedString),
        };
        out.push(escaped);
    }
    Ok(out)
}

/// Whether the final `"` is escaped by an odd run of backslashes.
fn ends_with_escaped_quote(slice: &str) -> bool {
    let body = &slice[..slice.len() - 1];
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 1
}
