use bir_diagnostic::ErrorCode;
use bir_ir::Position;
use bir_lexer::{lex, TokenKind};
use pretty_assertions::assert_eq;

#[test]
fn positions_are_one_based() {
    let tokens = lex("let a = 1\n  a++").unwrap();
    let positions: Vec<_> = tokens.iter().map(|token| token.position).collect();
    assert_eq!(positions[0], Position::new(1, 1));
    assert_eq!(positions[1], Position::new(1, 5));
    assert_eq!(positions[4], Position::new(2, 3));
}

#[test]
fn literal_forms_agree() {
    let tokens = lex("10 @b1010 @xA @o12").unwrap();
    let values: Vec<_> = tokens
        .iter()
        .filter_map(|token| match token.kind {
            TokenKind::Int(value) => Some(value),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![10, 10, 10, 10]);
}

#[test]
fn unterminated_string() {
    let err = lex("let s = \"abc").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E0003);
}
