#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::fs;
use std::path::Path;

use bir_diagnostic::ErrorCode;
use bir_ir::Position;
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;
use crate::interface::opcode;
use crate::io_handler::BufferIoHandler;

fn engine(source: &str) -> Engine {
    EngineBuilder::new(source)
        .io_handler(IoHandlerImpl::buffer())
        .build()
}

fn run(source: &str) -> Engine {
    let mut engine = engine(source);
    engine.init().unwrap();
    engine.run().unwrap();
    engine
}

fn run_err(source: &str) -> EvalError {
    let mut engine = engine(source);
    engine.init().and_then(|()| engine.run()).unwrap_err()
}

fn run_with_modules(dir: &Path, source: &str) -> EvalResult<Engine> {
    let mut engine = EngineBuilder::new(source)
        .stdlib_dir(dir)
        .io_handler(IoHandlerImpl::buffer())
        .build();
    engine.init()?;
    engine.run()?;
    Ok(engine)
}

// Expressions and variables

#[test]
fn globals_and_precedence() {
    let engine = run("let x = 1 + 2 * 3 ^ 2 const y = {x - 4} / 5");
    assert_eq!(engine.global("x"), Some(19));
    assert_eq!(engine.global("y"), Some(3));
    assert_eq!(engine.global("z"), None);
}

#[test]
fn negative_reference_reads_the_magnitude() {
    let engine = run("let a = -5 let b = -a let c = 5 let d = -c");
    assert_eq!(engine.global("b"), Some(5));
    assert_eq!(engine.global("d"), Some(5));
}

#[test]
fn quantity_modifiers_write_back() {
    let engine = run("let x = 10 x++ x += 5 x *= 2 x -= 4 x /= 3 x--");
    assert_eq!(engine.global("x"), Some(8));
}

#[test]
fn duplicate_declaration() {
    let err = run_err("let a = 1 let a = 2");
    assert_eq!(err.code(), ErrorCode::E6001);
    assert_eq!(err.position, Some(Position::new(1, 15)));
}

#[test]
fn undefined_reference() {
    assert_eq!(run_err("let b = c").code(), ErrorCode::E6002);
    assert_eq!(run_err("a = 1").code(), ErrorCode::E6002);
}

#[test]
fn const_cannot_be_reassigned() {
    let err = run_err("const a = 1 a = 2");
    assert_eq!(err.code(), ErrorCode::E6005);
    assert_eq!(err.to_string(), "cannot reassign const `a`");
}

#[test]
fn division_by_zero_is_a_fault() {
    assert_eq!(run_err("let a = 1 / 0").code(), ErrorCode::E6013);
    assert_eq!(run_err("let a = 4 a /= 0").code(), ErrorCode::E6013);
}

#[test]
fn strings_are_not_values() {
    assert_eq!(run_err("let s = \"hi\"").code(), ErrorCode::E6014);
}

// Control flow

#[test]
fn taken_branch_ends_the_enclosing_frame() {
    let engine = run("let x = 1 if x == 1 { x = 2 } x = 3");
    assert_eq!(engine.global("x"), Some(2));
}

#[test]
fn untaken_branch_falls_through() {
    let engine = run("let x = 0 if x == 1 { x = 2 } elif x == 2 { x = 4 } x = 3");
    assert_eq!(engine.global("x"), Some(3));
}

#[test]
fn elif_and_else() {
    let pick = |n: i64| {
        let source = format!(
            "let n = {n} let r = 0 if n == 1 {{ r = 10 }} elif n == 2 {{ r = 20 }} else {{ r = 30 }}"
        );
        run(&source).global("r")
    };
    assert_eq!(pick(1), Some(10));
    assert_eq!(pick(2), Some(20));
    assert_eq!(pick(3), Some(30));
}

#[test]
fn while_loops_until_false() {
    let engine = run("let i = 0 let total = 0 while i < 5 { total += i i++ }");
    assert_eq!(engine.global("i"), Some(5));
    assert_eq!(engine.global("total"), Some(10));
}

#[test]
fn while_body_shares_the_enclosing_scope() {
    let err = run_err("let i = 0 while i < 3 { let t = i i++ }");
    assert_eq!(err.code(), ErrorCode::E6001);
}

#[test]
fn for_iterations_get_their_own_scope() {
    let engine = run("let total = 0 for 4 as i { let sq = i * i total += sq }");
    assert_eq!(engine.global("total"), Some(14));
    assert_eq!(engine.global("i"), None);
    assert_eq!(engine.global("sq"), None);
}

#[test]
fn for_placeholder_is_constant() {
    assert_eq!(run_err("for 2 as i { i = 5 }").code(), ErrorCode::E6005);
}

#[test]
fn for_with_non_positive_count_never_runs() {
    let engine = run("let hits = 0 for 0 - 3 as i { hits++ }");
    assert_eq!(engine.global("hits"), Some(0));
}

#[test]
fn switch_matches_first_case() {
    let engine = run("let x = 5 switch x { case 1 { x = 10 } case 5 { x = 50 } default { x = 0 } } x = 7");
    assert_eq!(engine.global("x"), Some(50));
}

#[test]
fn switch_default() {
    let engine = run("let x = 9 switch x { case 1 { x = 10 } default { x = 0 } } x = 7");
    assert_eq!(engine.global("x"), Some(0));
}

#[test]
fn switch_without_match_falls_through() {
    let engine = run("let x = 5 switch x { case 1 { x = 10 } } x = 7");
    assert_eq!(engine.global("x"), Some(7));
}

#[test]
fn return_at_top_level_is_misuse() {
    let err = run_err("return 1");
    assert_eq!(err.code(), ErrorCode::E6008);
    assert_eq!(run_err("if 1 == 1 { return 1 }").code(), ErrorCode::E6008);
    assert_eq!(run_err("throw 1").code(), ErrorCode::E6008);
}

#[test]
fn return_in_a_loop_ends_the_iteration() {
    let source = "
        sum [n] {
            let total = 0
            let i = 0
            while i < n { i++ if i == 2 { return 0 } total += i }
            return total
        }
        let r = sum(4)
    ";
    // 1 + 3 + 4; the second iteration returns early.
    assert_eq!(run(source).global("r"), Some(8));
}

// Blocks

#[test]
fn block_returns_a_value() {
    let engine = run("add [a, b] { return a + b } let r = add(2, 3)");
    assert_eq!(engine.global("r"), Some(5));
}

#[test]
fn block_without_return_yields_zero() {
    let engine = run("noop [] { } let r = noop()");
    assert_eq!(engine.global("r"), Some(0));
}

#[test]
fn verbs_bind_like_arguments() {
    let engine = run("pick:which [a, b] { if which == 0 { return a } return b } let r = pick:1(7, 8)");
    assert_eq!(engine.global("r"), Some(8));
}

#[test]
fn block_sees_caller_bindings() {
    let engine = run("show [] { return offset } let offset = 4 let r = show()");
    assert_eq!(engine.global("r"), Some(4));
}

#[test]
fn block_parameters_stay_local() {
    let engine = run("twice [n] { n *= 2 return n } let n = 3 let r = twice(5)");
    assert_eq!(engine.global("r"), Some(10));
    assert_eq!(engine.global("n"), Some(3));
}

#[test]
fn init_instance_persists_across_calls() {
    let source = "
        counter:step [by] { init { let count = 0 } count += by return count }
        let a = counter:0(2)
        let b = counter:0(3)
    ";
    let engine = run(source);
    assert_eq!(engine.global("a"), Some(2));
    assert_eq!(engine.global("b"), Some(5));
    assert_eq!(engine.global("count"), None);
}

#[test]
fn recursion() {
    let source = "
        count [n] { if n == 0 { return 0 } return 1 + count(n - 1) }
        let r = count(10)
    ";
    assert_eq!(run(source).global("r"), Some(10));
}

#[test]
fn undefined_block() {
    let err = run_err("nope()");
    assert_eq!(err.code(), ErrorCode::E6003);
}

#[test]
fn duplicate_block() {
    assert_eq!(run_err("f [] { } f [] { }").code(), ErrorCode::E6001);
}

#[test]
fn arity_mismatch_lists_everything() {
    let err = run_err("move:dir [a, b] { return a } move(1)");
    assert_eq!(err.code(), ErrorCode::E6004);
    assert_eq!(
        err.to_string(),
        "wrong number of arguments for `move`: expected 1 verb, found 0, expected 2 arguments, found 1"
    );
}

#[test]
fn extra_call_values_are_ignored() {
    let engine = run("one [a] { return a } let r = one(1, 2) pick:v [] { return v } let p = pick:3:4()");
    assert_eq!(engine.global("r"), Some(1));
    assert_eq!(engine.global("p"), Some(3));
}

#[test]
fn extra_call_values_are_still_evaluated() {
    let err = run_err("one [a] { return a } one(1, 2 / 0)");
    assert_eq!(err.code(), ErrorCode::E6013);
}

#[test]
fn overflow_at_configured_limit() {
    let mut engine = EngineBuilder::new("loop [] { return loop() } loop()")
        .maximum_callstack_size(50)
        .io_handler(IoHandlerImpl::buffer())
        .build();
    engine.init().unwrap();
    let err = engine.run().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6007);
    assert_eq!(err.kind, EvalErrorKind::CallStackOverflow { limit: 50 });
}

#[test]
fn overflow_at_default_limit() {
    let err = run_err("loop [] { return loop() } loop()");
    assert_eq!(
        err.kind,
        EvalErrorKind::CallStackOverflow {
            limit: DEFAULT_MAXIMUM_CALLSTACK_SIZE
        }
    );
}

#[test]
fn throw_escapes_blocks() {
    let err = run_err("boom [] { throw 7 } let r = boom()");
    assert_eq!(err.code(), ErrorCode::E6009);
    assert_eq!(err.to_string(), "uncaught throw of 7");
}

#[test]
fn error_report_names_frames() {
    let err = run_err("f [] { throw 3 }\nf()");
    let report = err.report.unwrap();
    assert_eq!(report.filename, "<memory>");
    assert_eq!(report.callstack, vec!["<main>".to_string(), "f".to_string()]);
    assert_eq!(err.position.map(|p| p.line), Some(1));
}

// Inheritance and scope mutaters

#[test]
fn implementing_copies_shape_and_populates() {
    let source = "
        text [i] { init { let index = 0 } if i < 0 { return index } return $read(i) }
        greeting implements text { \"AB\" }
        let first = greeting(0)
        let second = greeting(1)
        let len = greeting(-1)
    ";
    let engine = run(source);
    assert_eq!(engine.global("first"), Some(65));
    assert_eq!(engine.global("second"), Some(66));
    assert_eq!(engine.global("len"), Some(2));
}

#[test]
fn implementing_with_array_populate() {
    let source = "
        list [i] { init { let index = 0 } return $read(i) }
        let base = 10
        nums implements list { [base, base * 2] }
        let r = nums(1)
    ";
    assert_eq!(run(source).global("r"), Some(20));
}

#[test]
fn populated_slots_are_constant() {
    let source = "
        list [] { init { let index = 0 } $write(0, 1) }
        nums implements list { [5] }
        nums()
    ";
    assert_eq!(run_err(source).code(), ErrorCode::E6005);
}

#[test]
fn populate_overwrites_a_const_index() {
    let source = "
        list [] { init { const index = 0 } return index }
        nums implements list { \"AB\" }
        let r = nums()
        let base = list()
    ";
    let engine = run(source);
    assert_eq!(engine.global("r"), Some(2));
    assert_eq!(engine.global("base"), Some(0));
}

#[test]
fn init_can_write_its_own_slots() {
    let source = "
        list [] { init { let index = 0 $write(0, 5) } return $read(0) }
        let r = list()
    ";
    assert_eq!(run(source).global("r"), Some(5));
}

#[test]
fn implementing_unknown_block() {
    assert_eq!(run_err("x implements nothing { \"a\" }").code(), ErrorCode::E6003);
}

#[test]
fn write_then_read_and_delete() {
    let source = "
        store [v] { init { let last = 0 } $write(0, v) let got = $read(0) $delete(0) return got }
        let r = store(9)
    ";
    assert_eq!(run(source).global("r"), Some(9));
}

#[test]
fn delete_returns_zero() {
    let source = "
        store [] { init { let last = 0 } $write(0, 4) return $delete(0) }
        let r = store()
    ";
    assert_eq!(run(source).global("r"), Some(0));
}

#[test]
fn read_missing_slot() {
    let source = "box [] { init { let x = 0 } return $read(3) } box()";
    let err = run_err(source);
    assert_eq!(err.code(), ErrorCode::E6012);
}

#[test]
fn mutater_needs_an_instance() {
    assert_eq!(run_err("$read(0)").code(), ErrorCode::E6011);
    assert_eq!(run_err("bare [] { return $read(0) } bare()").code(), ErrorCode::E6011);
}

#[test]
fn mutater_argument_count() {
    let err = run_err("box [] { init { let x = 0 } $write(0) } box()");
    assert_eq!(err.code(), ErrorCode::E6004);
}

// Interface

#[test]
fn push_and_output() {
    let engine = run("bir:4206901(72) bir:4206901(105) let r = bir:4206909(1)");
    assert_eq!(engine.output(), "Hi");
    assert_eq!(engine.global("r"), Some(1));
}

#[test]
fn input_and_pull() {
    let handler = IoHandlerImpl::Buffer(BufferIoHandler::with_input(["ok"]));
    let mut engine = EngineBuilder::new(
        "bir:4206908() let a = bir:4206913() let b = bir:4206913() let c = bir:4206913()",
    )
    .io_handler(handler)
    .build();
    engine.init().unwrap();
    engine.run().unwrap();
    assert_eq!(engine.global("a"), Some(i64::from(b'o')));
    assert_eq!(engine.global("b"), Some(i64::from(b'k')));
    assert_eq!(engine.global("c"), Some(opcode::DONE));
}

#[test]
fn push_without_argument() {
    assert_eq!(run_err("bir:4206901()").code(), ErrorCode::E6004);
}

// Parsing

#[test]
fn syntax_error_surfaces_from_init() {
    let mut engine = engine("let 5 = 1");
    let err = engine.init().unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1004);
    assert!(err.report.is_some());
}

// Imports

#[test]
fn imported_block_reads_caller_locals() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lib.bir"),
        "let base = 10\nscale [x] { return x * base + offset }\n",
    )
    .unwrap();

    let engine = run_with_modules(dir.path(), "use \"lib\"\nlet offset = 3\nlet r = scale(2)").unwrap();
    assert_eq!(engine.global("r"), Some(23));
    assert_eq!(engine.global("base"), Some(10));
    assert_eq!(engine.uses().count(), 1);
}

#[test]
fn module_globals_are_read_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.bir"), "let base = 10").unwrap();

    let err = run_with_modules(dir.path(), "use \"lib\"\nbase = 5").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6006);
}

#[test]
fn module_blocks_cannot_write_module_globals() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lib.bir"),
        "let total = 0\nbump [] { total += 1 return total }\n",
    )
    .unwrap();

    let err = run_with_modules(dir.path(), "use \"lib\"\nbump()").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6006);
    assert_eq!(err.report.unwrap().filename, "lib.bir");
}

#[test]
fn module_block_instance_persists_across_calls() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("lib.bir"),
        "counter [] { init { let count = 0 } count += 1 return count }\n",
    )
    .unwrap();

    let engine =
        run_with_modules(dir.path(), "use \"lib\"\nlet a = counter()\nlet b = counter()").unwrap();
    assert_eq!(engine.global("a"), Some(1));
    assert_eq!(engine.global("b"), Some(2));
}

#[test]
fn bridged_call_restores_the_module_scope() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.bir"), "id [x] { return x }\n").unwrap();

    let engine = run_with_modules(dir.path(), "use \"lib\"\nlet r = id(4)").unwrap();
    assert_eq!(engine.global("r"), Some(4));

    let module = engine.uses.values().next().unwrap();
    let top = module.scopestack.last().unwrap().borrow();
    assert!(top.is_foreign());
    assert_eq!(module.scopestack.len(), 1);
    assert!(module.callstack.is_empty());
    assert!(engine.callstack.is_empty());
}

#[test]
fn modules_share_the_interface() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.bir"), "bir:4206901(65)").unwrap();

    let engine = run_with_modules(dir.path(), "use \"lib\"\nbir:4206909()").unwrap();
    assert_eq!(engine.output(), "A");
}

#[test]
fn missing_module() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_with_modules(dir.path(), "use \"nope\"").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6010);
    assert_eq!(err.position, Some(Position::new(1, 1)));
}

#[test]
fn cyclic_imports() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.bir"), "use \"b\"").unwrap();
    fs::write(dir.path().join("b.bir"), "use \"a\"").unwrap();

    let err = run_with_modules(dir.path(), "use \"a\"").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6015);
    assert!(err.to_string().contains("a -> b -> a"));
}

#[test]
fn module_syntax_error_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.bir"), "let = 1").unwrap();

    let err = run_with_modules(dir.path(), "use \"lib\"").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6016);
    assert_eq!(err.report.unwrap().filename, "lib.bir");
}

#[test]
fn nested_imports_resolve_through_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("inner.bir"), "double [x] { return x * 2 }").unwrap();
    fs::write(
        dir.path().join("outer.bir"),
        "use \"inner\"\nquad [x] { return double(double(x)) }",
    )
    .unwrap();

    let engine = run_with_modules(dir.path(), "use \"outer\"\nlet r = quad(3)").unwrap();
    assert_eq!(engine.global("r"), Some(12));
}
