use pretty_assertions::assert_eq;

use super::{eval, eval_err};
use crate::{EvalErrorKind, Value};

#[test]
fn default_parameters() {
    assert_eq!(eval("def f(a, b = 5) { a + b }; f(10)"), Value::Int(15));
    assert_eq!(eval("def f(a, b = 5) { a + b }; f(10, 1)"), Value::Int(11));
}

#[test]
fn defaults_use_the_defining_scope() {
    assert_eq!(
        eval("base = 10; def f(x = base) { x }; base = 20; f()"),
        Value::Int(20)
    );
    assert_eq!(
        eval("base = 10; def f(x = base) { x }; def g() { var base = 99; f() }; g()"),
        Value::Int(10)
    );
}

#[test]
fn argument_count_errors() {
    assert_eq!(
        eval_err("def f(a, b) { a }; f(1)"),
        EvalErrorKind::MissingArgument {
            function: "f".into(),
            param: "b".into()
        }
    );
    assert_eq!(
        eval_err("def f(a) { a }; f(1, 2)"),
        EvalErrorKind::TooManyArguments {
            function: "f".into(),
            expected: 1,
            got: 2
        }
    );
}

#[test]
fn only_functions_are_callable() {
    assert_eq!(
        eval_err("x = 3; x(1)"),
        EvalErrorKind::NotCallable { type_name: "int" }
    );
}

#[test]
fn recursion_by_name() {
    assert_eq!(
        eval("def fact(n) { if (n <= 1) { return 1 }; n * fact(n - 1) }; fact(10)"),
        Value::Int(3_628_800)
    );
}

#[test]
fn declared_closures_recurse_through_their_binding() {
    assert_eq!(
        eval("var fact = def (n) { if (n <= 1) { return 1 }; n * fact(n - 1) }; fact(5)"),
        Value::Int(120)
    );
    let nested = "
        def outer() {
            var count = def (n) { if (n == 0) { return 0 }; 1 + count(n - 1) };
            count(3)
        };
        outer()
    ";
    assert_eq!(eval(nested), Value::Int(3));
    assert_eq!(
        eval_err("var x = x"),
        EvalErrorKind::Uninitialized { name: "x".into() }
    );
}

#[test]
fn deep_recursion_grows_the_stack() {
    assert_eq!(
        eval("def down(n) { if (n == 0) { return 0 }; 1 + down(n - 1) }; down(10000)"),
        Value::Int(10_000)
    );
}

#[test]
fn mutual_recursion_between_top_level_functions() {
    let source = "
        def is_even(n) { if (n == 0) { return true }; is_odd(n - 1) };
        def is_odd(n) { if (n == 0) { return false }; is_even(n - 1) };
        is_even(10)
    ";
    assert_eq!(eval(source), Value::Bool(true));
}

#[test]
fn returned_closures_keep_their_environment() {
    assert_eq!(
        eval("def adder(n) { return def (x) { x + n } }; add5 = adder(5); add5(10)"),
        Value::Int(15)
    );
}

#[test]
fn curried_calls() {
    assert_eq!(
        eval("def add(a) { return def (b) { a + b } }; add(2)(3)"),
        Value::Int(5)
    );
}

#[test]
fn closures_share_captured_state() {
    let source = "
        def make() {
            n = 0;
            def inc() { n += 1 };
            def get() { n };
            return def (which) { if (which == 0) { return inc } else { return get } }
        };
        pick = make();
        inc = pick(0);
        get = pick(1);
        inc();
        inc();
        get()
    ";
    assert_eq!(eval(source), Value::Int(2));
}

#[test]
fn return_unwinds_nested_loops() {
    let source = "
        def find() {
            for (i = 0; i < 10; i += 1) {
                j = 0;
                while (j < 10) {
                    if (i * j == 12) { return i * 100 + j };
                    j += 1
                }
            };
            return -1
        };
        find()
    ";
    assert_eq!(eval(source), Value::Int(206));
}

#[test]
fn definitions_evaluate_to_functions() {
    let value = eval("def f() { 1 }");
    assert!(matches!(value, Value::Function(_)));
    assert_eq!(value.to_string(), "<function f>");
    assert_eq!(eval("h = def () { 1 }; h").to_string(), "<function anon#0>");
}

#[test]
fn functions_compare_by_identity() {
    assert_eq!(eval("def f() { 1 }; g = f; f == g"), Value::Bool(true));
    assert_eq!(eval("def f() { 1 }; def h() { 1 }; f == h"), Value::Bool(false));
}
