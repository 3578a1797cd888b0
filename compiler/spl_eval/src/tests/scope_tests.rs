use pretty_assertions::assert_eq;

use super::{eval, eval_err, run_twice, run_with};
use crate::{EvalErrorKind, Value};

#[test]
fn loop_body_variables_do_not_leak() {
    assert_eq!(
        eval_err("for (i = 0; i < 3; i += 1) { inner = i }; inner"),
        EvalErrorKind::UndefinedVariable {
            name: "inner".into()
        }
    );
    assert_eq!(
        eval_err("if (true) { y = 2 }; y"),
        EvalErrorKind::UndefinedVariable { name: "y".into() }
    );
}

#[test]
fn loop_bodies_are_fresh_each_iteration() {
    let source = "
        first = null;
        for (i = 0; i < 2; i += 1) {
            v = i;
            g = def () { v };
            if (i == 0) { first = g }
        };
        first()
    ";
    assert_eq!(eval(source), Value::Int(0));
}

#[test]
fn loop_title_outlives_iterations() {
    assert_eq!(
        eval("s = 0; for (i = 0; i < 4; i += 1) { s += i }; s"),
        Value::Int(6)
    );
}

#[test]
fn plain_assignment_updates_the_visible_binding() {
    assert_eq!(eval("x = 1; if (true) { x = 2 }; x"), Value::Int(2));
    assert_eq!(eval("x = 1; if (true) { var x = 2 }; x"), Value::Int(1));
}

#[test]
fn constants() {
    assert_eq!(eval("const k = 2; k * 3"), Value::Int(6));
}

#[test]
fn reading_an_unassigned_slot_fails() {
    assert_eq!(
        eval_err("for (i = 0; i < 2; j = i) { k = j; i += 1 }"),
        EvalErrorKind::Uninitialized { name: "j".into() }
    );
}

#[test]
fn host_globals_are_visible() {
    assert_eq!(
        run_with("limit * 2", &[("limit", Value::Int(21))]),
        Ok(Value::Int(42))
    );
    assert_eq!(
        eval_err("missing += 1"),
        EvalErrorKind::UndefinedVariable {
            name: "missing".into()
        }
    );
}

#[test]
fn runs_do_not_share_state() {
    let (first, second) = run_twice("hits += 1; hits", &[("hits", Value::Int(0))]);
    assert_eq!(first, Ok(Value::Int(1)));
    assert_eq!(second, Ok(Value::Int(1)));

    let (first, second) = run_twice("def f() { 1 }; n = f() + 1; n", &[]);
    assert_eq!(first, Ok(Value::Int(2)));
    assert_eq!(first, second);
}

#[test]
fn later_runs_start_with_empty_slots() {
    // The closure reads `seen` before the first run ever assigns it.
    let source = "def call(f) { f() }; var seen = call(def () { seen }); seen";
    let (first, second) = run_twice(source, &[]);
    let uninitialized = EvalErrorKind::Uninitialized {
        name: "seen".into(),
    };
    assert_eq!(first.unwrap_err().kind, uninitialized);
    assert_eq!(second.unwrap_err().kind, uninitialized);
}
