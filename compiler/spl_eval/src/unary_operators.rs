//! Prefix operator semantics.

use spl_ir::UnaryOp;

use crate::errors::{integer_overflow, invalid_unary_op, EvalResult};
use crate::value::Value;

#[expect(
    clippy::needless_pass_by_value,
    reason = "Callers hand over freshly evaluated operands"
)]
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> EvalResult {
    match (op, &operand) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        _ => Err(invalid_unary_op(op, &operand)),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;

    #[test]
    fn negation_and_not() {
        assert_eq!(evaluate_unary(Value::Int(4), UnaryOp::Neg), Ok(Value::Int(-4)));
        assert_eq!(evaluate_unary(Value::Float(0.5), UnaryOp::Neg), Ok(Value::Float(-0.5)));
        assert_eq!(evaluate_unary(Value::Bool(true), UnaryOp::Not), Ok(Value::Bool(false)));
    }

    #[test]
    fn rejects_other_operands() {
        let err = evaluate_unary(Value::Int(1), UnaryOp::Not).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::InvalidUnaryOp {
                op: "!",
                type_name: "int"
            }
        );
        let err = evaluate_unary(Value::Int(i64::MIN), UnaryOp::Neg).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::IntegerOverflow {
                operation: "negation"
            }
        );
    }
}
