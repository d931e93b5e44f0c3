use pretty_assertions::assert_eq;

use crate::common::{run, run_with_input};

#[test]
fn prints_a_populated_string() {
    let source = "
        text [] {
            init { let index = 0 }
            let i = 0
            while i < index { bir:4206901($read(i)) i++ }
            return bir:4206909(index)
        }
        greeting implements text { \"Hi!\" }
        let written = greeting()
    ";
    let engine = run(source).unwrap();
    assert_eq!(engine.output(), "Hi!");
    assert_eq!(engine.global("written"), Some(3));
}

#[test]
fn echoes_a_line() {
    let source = "
        bir:4206908()
        let c = bir:4206913()
        while c !== 4206910 { bir:4206901(c) c = bir:4206913() }
        bir:4206909()
    ";
    let engine = run_with_input(source, &["echo\r"]).unwrap();
    assert_eq!(engine.output(), "echo");
}

#[test]
fn sums_multiples() {
    let engine = run("let total = 0 for 10 as i { if i % 3 == 0 { total += i } }").unwrap();
    assert_eq!(engine.global("total"), Some(18));
}

#[test]
fn roots_and_logs() {
    let engine = run("let r = 27 ' 3 let l = 1000 log let p = 2 ^ 10").unwrap();
    assert_eq!(engine.global("r"), Some(3));
    assert_eq!(engine.global("l"), Some(3));
    assert_eq!(engine.global("p"), Some(1024));
}

#[test]
fn fibonacci_memoised_in_the_instance() {
    let source = "
        fib [n] {
            init { for 16 as i { $write(i, -1) } }
            calls++
            if n < 2 { return n }
            let known = $read(n)
            if known >= 0 { return known }
            let value = fib(n - 1) + fib(n - 2)
            $write(n, value)
            return value
        }
        let calls = 0
        let f = fib(15)
        let first = calls
        let again = fib(15)
    ";
    let engine = run(source).unwrap();
    assert_eq!(engine.global("f"), Some(610));
    assert_eq!(engine.global("again"), Some(610));
    // Every n >= 2 is computed once, so each computation makes two calls.
    assert_eq!(engine.global("first"), Some(29));
    assert_eq!(engine.global("calls"), Some(30));
}

#[test]
fn counter_objects_are_independent() {
    let source = "
        counter [by] { init { let count = 0 } count += by return count }
        left implements counter
        right implements counter
        left(1) left(1)
        right(10)
        let l = left(0)
        let r = right(0)
    ";
    let engine = run(source).unwrap();
    assert_eq!(engine.global("l"), Some(2));
    assert_eq!(engine.global("r"), Some(10));
}
