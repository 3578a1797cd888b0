//! Binary operator semantics over every operand type pair.

use crate::errors::{EvalErrorKind, EvalResult};
use crate::operators::evaluate_binary;
use crate::value::Value;
use spl_ir::BinaryOp;

fn kind(result: EvalResult) -> EvalErrorKind {
    match result {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(err) => err.kind,
    }
}

#[test]
fn int_arithmetic() {
    assert_eq!(evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Add), Ok(Value::Int(9)));
    assert_eq!(evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Div), Ok(Value::Int(3)));
    assert_eq!(evaluate_binary(Value::Int(-7), Value::Int(2), BinaryOp::Mod), Ok(Value::Int(-1)));
    assert_eq!(evaluate_binary(Value::Int(1), Value::Int(4), BinaryOp::Shl), Ok(Value::Int(16)));
    assert_eq!(evaluate_binary(Value::Int(6), Value::Int(3), BinaryOp::BitXor), Ok(Value::Int(5)));
}

#[test]
fn int_errors() {
    assert_eq!(
        kind(evaluate_binary(Value::Int(1), Value::Int(0), BinaryOp::Div)),
        EvalErrorKind::DivisionByZero
    );
    assert_eq!(
        kind(evaluate_binary(Value::Int(1), Value::Int(0), BinaryOp::Mod)),
        EvalErrorKind::ModuloByZero
    );
    assert_eq!(
        kind(evaluate_binary(Value::Int(i64::MAX), Value::Int(1), BinaryOp::Add)),
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert_eq!(
        kind(evaluate_binary(Value::Int(i64::MIN), Value::Int(-1), BinaryOp::Div)),
        EvalErrorKind::IntegerOverflow {
            operation: "division"
        }
    );
    assert_eq!(
        kind(evaluate_binary(Value::Int(1), Value::Int(-1), BinaryOp::Shl)),
        EvalErrorKind::IntegerOverflow {
            operation: "left shift"
        }
    );
}

#[test]
fn mixed_numbers_promote_to_float() {
    assert_eq!(evaluate_binary(Value::Int(1), Value::Float(0.5), BinaryOp::Add), Ok(Value::Float(1.5)));
    assert_eq!(evaluate_binary(Value::Float(3.0), Value::Int(2), BinaryOp::Mul), Ok(Value::Float(6.0)));
    assert_eq!(evaluate_binary(Value::Int(1), Value::Float(2.5), BinaryOp::Lt), Ok(Value::Bool(true)));
}

#[test]
fn float_division_follows_ieee() {
    assert_eq!(
        evaluate_binary(Value::Float(1.0), Value::Float(0.0), BinaryOp::Div),
        Ok(Value::Float(f64::INFINITY))
    );
}

#[test]
fn equality_flavours() {
    assert_eq!(evaluate_binary(Value::Int(1), Value::Float(1.0), BinaryOp::Eq), Ok(Value::Bool(true)));
    assert_eq!(
        evaluate_binary(Value::Int(1), Value::Float(1.0), BinaryOp::StrictEq),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        evaluate_binary(Value::Null, Value::Int(0), BinaryOp::NotEq),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        evaluate_binary(Value::from("a"), Value::from("a"), BinaryOp::StrictNotEq),
        Ok(Value::Bool(false))
    );
}

#[test]
fn strings_concatenate_and_compare() {
    assert_eq!(
        evaluate_binary(Value::from("ab"), Value::from("cd"), BinaryOp::Add),
        Ok(Value::from("abcd"))
    );
    assert_eq!(evaluate_binary(Value::from("a"), Value::from("b"), BinaryOp::Lt), Ok(Value::Bool(true)));
}

#[test]
fn mismatched_operands() {
    assert_eq!(
        kind(evaluate_binary(Value::from("a"), Value::Int(1), BinaryOp::Add)),
        EvalErrorKind::InvalidBinaryOp {
            op: "+",
            left: "str",
            right: "int",
        }
    );
    assert_eq!(
        kind(evaluate_binary(Value::Float(1.5), Value::Int(1), BinaryOp::BitAnd)),
        EvalErrorKind::InvalidBinaryOp {
            op: "&",
            left: "float",
            right: "int",
        }
    );
    assert_eq!(
        kind(evaluate_binary(Value::Int(1), Value::Int(2), BinaryOp::And)),
        EvalErrorKind::InvalidBinaryOp {
            op: "&&",
            left: "int",
            right: "int",
        }
    );
}
