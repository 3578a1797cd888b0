//! Binary operator semantics.
//!
//! Dispatch is a match over operand type pairs. `&&` and `||` arrive here
//! only with both operands already evaluated; the interpreter handles
//! short-circuiting before calling in.

use std::cmp::Ordering;

use spl_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero, EvalError, EvalResult,
};
use crate::value::Value;

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

#[inline]
fn checked_div(
    divisor: i64,
    op: impl FnOnce() -> Option<i64>,
    zero: fn() -> EvalError,
    op_name: &'static str,
) -> EvalResult {
    if divisor == 0 {
        Err(zero())
    } else {
        op().map(Value::Int).ok_or_else(|| integer_overflow(op_name))
    }
}

/// Evaluate `left op right`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Callers hand over freshly evaluated operands"
)]
#[expect(clippy::cast_precision_loss, reason = "mixed int/float arithmetic promotes to float")]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left.loose_eq(&right))),
        BinaryOp::NotEq => return Ok(Value::Bool(!left.loose_eq(&right))),
        BinaryOp::StrictEq => return Ok(Value::Bool(left.strict_eq(&right))),
        BinaryOp::StrictNotEq => return Ok(Value::Bool(!left.strict_eq(&right))),
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(*a as f64, *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, *b as f64, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        _ => None,
    }
    .unwrap_or_else(|| Err(invalid_binary_op(op, &left, &right)))
}

/// `None` when `op` does not apply to ints.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> Option<EvalResult> {
    let result = match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(b, || a.checked_div(b), division_by_zero, "division"),
        BinaryOp::Mod => checked_div(b, || a.checked_rem(b), modulo_by_zero, "remainder"),
        BinaryOp::BitAnd => Ok(Value::Int(a & b)),
        BinaryOp::BitOr => Ok(Value::Int(a | b)),
        BinaryOp::BitXor => Ok(Value::Int(a ^ b)),
        BinaryOp::Shl => checked_arith(
            u32::try_from(b).ok().and_then(|s| a.checked_shl(s)),
            "left shift",
        ),
        BinaryOp::Shr => checked_arith(
            u32::try_from(b).ok().and_then(|s| a.checked_shr(s)),
            "right shift",
        ),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => return None,
    };
    Some(result)
}

/// IEEE 754 semantics; division by zero yields infinity or NaN.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> Option<EvalResult> {
    let value = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Mod => Value::Float(a % b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        _ => return None,
    };
    Some(Ok(value))
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> Option<EvalResult> {
    let value = match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Value::string(joined)
        }
        BinaryOp::Lt => Value::Bool(a.cmp(b) == Ordering::Less),
        BinaryOp::LtEq => Value::Bool(a.cmp(b) != Ordering::Greater),
        BinaryOp::Gt => Value::Bool(a.cmp(b) == Ordering::Greater),
        BinaryOp::GtEq => Value::Bool(a.cmp(b) != Ordering::Less),
        _ => return None,
    };
    Some(Ok(value))
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Option<EvalResult> {
    let value = match op {
        BinaryOp::And => a && b,
        BinaryOp::Or => a || b,
        _ => return None,
    };
    Some(Ok(Value::Bool(value)))
}

