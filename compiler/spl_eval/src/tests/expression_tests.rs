use pretty_assertions::assert_eq;
use spl_diagnostic::ErrorCode;
use spl_ir::Span;

use super::{eval, eval_err, eval_error};
use crate::{EvalErrorKind, Value};

#[test]
fn precedence_and_grouping() {
    assert_eq!(eval("2 + 3 * 4"), Value::Int(14));
    assert_eq!(eval("(2 + 3) * 4"), Value::Int(20));
    assert_eq!(eval("10 - 3 - 2"), Value::Int(5));
    assert_eq!(eval("6 & 3 | 8"), Value::Int(10));
    assert_eq!(eval("1 << 3 + 1"), Value::Int(16));
}

#[test]
fn unary_operators() {
    assert_eq!(eval("-3 + 5"), Value::Int(2));
    assert_eq!(eval("!true"), Value::Bool(false));
    assert_eq!(eval("!(1 < 2)"), Value::Bool(false));
    assert_eq!(eval("2 * -3"), Value::Int(-6));
}

#[test]
fn numbers_and_strings() {
    assert_eq!(eval("1 + 0.5"), Value::Float(1.5));
    assert_eq!(eval("7 / 2"), Value::Int(3));
    assert_eq!(eval("\"ab\" + 'cd'"), Value::from("abcd"));
}

#[test]
fn strict_equality_distinguishes_representations() {
    assert_eq!(eval("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval("1 === 1.0"), Value::Bool(false));
    assert_eq!(eval("1 !== 1.0"), Value::Bool(true));
    assert_eq!(eval("null == null"), Value::Bool(true));
    assert_eq!(eval("'a' == 1"), Value::Bool(false));
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval("false && undefined_thing"), Value::Bool(false));
    assert_eq!(eval("true || missing()"), Value::Bool(true));
    assert_eq!(eval("true && 1 < 2"), Value::Bool(true));
}

#[test]
fn logical_operators_need_booleans() {
    assert_eq!(
        eval_err("true && 1"),
        EvalErrorKind::TypeMismatch {
            expected: "bool",
            got: "int"
        }
    );
    assert_eq!(
        eval_err("null || true"),
        EvalErrorKind::TypeMismatch {
            expected: "bool",
            got: "null"
        }
    );
}

#[test]
fn compound_assignment() {
    assert_eq!(eval("x = 5; x *= 3; x -= 1; x"), Value::Int(14));
    assert_eq!(eval("s = 'a'; s += 'b'"), Value::from("ab"));
}

#[test]
fn arithmetic_errors() {
    assert_eq!(eval_err("1 / 0"), EvalErrorKind::DivisionByZero);
    assert_eq!(eval_err("5 % 0"), EvalErrorKind::ModuloByZero);
    assert_eq!(
        eval_err("9223372036854775807 + 1"),
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert_eq!(
        eval_err("'a' - 1"),
        EvalErrorKind::InvalidBinaryOp {
            op: "-",
            left: "str",
            right: "int"
        }
    );
}

#[test]
fn program_value_is_last_statement() {
    assert_eq!(eval("x = 3; x"), Value::Int(3));
    assert_eq!(eval("{ 1; 2 }"), Value::Int(2));
    assert_eq!(eval("{ }"), Value::Null);
    assert_eq!(eval(""), Value::Null);
}

#[test]
fn top_level_return_ends_the_program() {
    assert_eq!(eval("return 7; 8"), Value::Int(7));
    assert_eq!(eval("x = 1; return; x"), Value::Null);
}

#[test]
fn errors_point_at_the_failing_node() {
    let err = eval_error("x = 1;\ny = z + 1");
    assert_eq!(err.span, Some(Span::new(11, 12)));
    assert_eq!(err.code(), ErrorCode::E6001);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable { name: "z".into() }
    );
}
