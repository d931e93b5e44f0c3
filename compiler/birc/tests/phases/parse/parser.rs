use bir_diagnostic::ErrorCode;
use bir_ir::{Position, Statement};
use bir_parse::parse;
use pretty_assertions::assert_eq;

#[test]
fn imports_come_first() {
    let program = parse("use \"io\"\nuse \"math\"\nlet a = 1").unwrap();
    assert_eq!(program.imports.len(), 2);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn whole_program_shape() {
    let source = "
        counter:step [by] {
            init { let count = 0 }
            count += by
            return count
        }
        letters implements counter { \"ab\" }
        for 3 as i { counter:0(i) }
    ";
    let program = parse(source).unwrap();
    let kinds: Vec<_> = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::BlockDecl(decl) if decl.implements.is_some() => "implements",
            Statement::BlockDecl(_) => "block",
            Statement::For { .. } => "for",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["block", "implements", "for"]);
}

#[test]
fn syntax_error_position() {
    let err = parse("let a = 1\nlet = 2").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1004);
    assert_eq!(err.position, Position::new(2, 5));
}
