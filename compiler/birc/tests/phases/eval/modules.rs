use std::fs;

use bir_diagnostic::ErrorCode;
use bir_eval::{EngineConfig, IoHandlerImpl};
use birc::commands::{read_source, run_source};
use pretty_assertions::assert_eq;

use crate::common::run_in;

#[test]
fn missing_script_is_a_driver_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bir");
    let diagnostic = read_source(&path.display().to_string()).unwrap_err();
    assert_eq!(diagnostic.code, ErrorCode::E9002);
    assert!(diagnostic.message.starts_with("cannot find file"));
}

#[test]
fn script_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.bir");
    fs::write(&path, "let answer = 6 * 7").unwrap();

    let path = path.display().to_string();
    let source = read_source(&path).unwrap();
    let engine =
        run_source(&path, source, EngineConfig::default(), IoHandlerImpl::buffer()).unwrap();
    assert_eq!(engine.filename(), "main.bir");
    assert_eq!(engine.global("answer"), Some(42));
}

#[test]
fn library_blocks_and_globals() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("math.bir"),
        "const ten = 10\nsquare [x] { return x * x }\n",
    )
    .unwrap();

    let engine = run_in(dir.path(), "use \"math\"\nlet r = square(ten) + 1").unwrap();
    assert_eq!(engine.global("r"), Some(101));
    assert_eq!(engine.uses().count(), 1);
}

#[test]
fn library_output_buffers_are_shared() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("io.bir"),
        "print [c] { bir:4206901(c) return bir:4206909() }",
    )
    .unwrap();

    let engine = run_in(dir.path(), "use \"io\"\nprint(79) print(75)").unwrap();
    assert_eq!(engine.output(), "OK");
}

#[test]
fn missing_library() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_in(dir.path(), "use \"nope\"").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6010);
}
