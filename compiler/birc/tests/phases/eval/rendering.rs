use std::fs;

use pretty_assertions::assert_eq;

use crate::common::{render, run, run_in};

#[test]
fn throw_inside_a_block() {
    let source = "count [n] {\n  throw n\n}\ncount(4)";
    let err = run(source).unwrap_err();
    assert_eq!(
        render(&err, source),
        "error[E6009]: uncaught throw of 4 at main.bir 2:3\n\
         \x20 throw n\n\
         \x20 ^\n\
         Callstack:\n\t-> <main> ()\n\t-> count ()\n\
         File:\n\tmain.bir\n"
    );
}

#[test]
fn undefined_reference_at_top_level() {
    let source = "let a = 1\nlet b = c";
    let err = run(source).unwrap_err();
    assert_eq!(
        render(&err, source),
        "error[E6002]: undefined reference `c` at main.bir 2:9\n\
         let b = c\n\
         \x20       ^\n\
         Callstack:\n\t-> <main> ()\n\
         File:\n\tmain.bir\n"
    );
}

#[test]
fn overflow_carries_a_note() {
    let source = "spin [] { return spin() }\nspin()";
    let err = run(source).unwrap_err();
    let text = render(&err, source);
    assert!(text.starts_with("error[E6007]: maximum call stack size of 8000 exceeded"));
    assert!(text.contains("= note: check for a block that calls itself"));
}

#[test]
fn syntax_error_has_no_callstack() {
    let source = "let = 1";
    let err = run(source).unwrap_err();
    let text = render(&err, source);
    assert!(text.starts_with("error[E1004]: expected identifier"));
    assert!(text.contains("at main.bir 1:5"));
    assert!(!text.contains("Callstack:"));
}

#[test]
fn module_errors_point_into_the_module() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.bir");
    fs::write(&lib, "boom [] { throw 1 }").unwrap();

    let source = "use \"lib\"\nboom()";
    let err = run_in(dir.path(), source).unwrap_err();
    let text = render(&err, source);
    assert!(text.starts_with("error[E6009]: uncaught throw of 1 at lib.bir 1:11\n"));
    assert!(text.contains("boom [] { throw 1 }\n          ^\n"));
    assert!(text.contains("\t-> <main> ()\n\t-> boom ()\n"));
    assert!(text.contains(&format!("File:\n\t{}\n", lib.display())));
}
