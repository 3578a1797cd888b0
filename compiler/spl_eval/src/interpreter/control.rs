//! Branches, loops and short-circuit logic.

use spl_ir::{BinaryOp, ExprId, ScopeShape};

use super::{Flow, Interpreter};
use crate::environment::Environment;
use crate::errors::{type_mismatch, EvalError};
use crate::value::Value;

impl Interpreter<'_> {
    /// Conditions and logical operands must be booleans.
    fn truth(&self, value: &Value, id: ExprId) -> Result<bool, EvalError> {
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("bool", value).with_span(self.span_of(id)))
    }

    pub(super) fn eval_logical(
        &self,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
        env: &Environment,
    ) -> Result<Flow, EvalError> {
        let lhs = value!(self.eval(left, env)?);
        let lhs = self.truth(&lhs, left)?;
        let decided = match op {
            BinaryOp::And => !lhs,
            _ => lhs,
        };
        if decided {
            return Ok(Flow::Normal(Value::Bool(lhs)));
        }
        let rhs = value!(self.eval(right, env)?);
        let rhs = self.truth(&rhs, right)?;
        Ok(Flow::Normal(Value::Bool(rhs)))
    }

    pub(super) fn eval_if(
        &self,
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
        (then_scope, else_scope): (ScopeShape, ScopeShape),
        env: &Environment,
    ) -> Result<Flow, EvalError> {
        let test = value!(self.eval(cond, env)?);
        if self.truth(&test, cond)? {
            self.eval(then_branch, &env.child(then_scope))
        } else if let Some(else_branch) = else_branch {
            self.eval(else_branch, &env.child(else_scope))
        } else {
            Ok(Flow::Normal(Value::Null))
        }
    }

    /// Shared driver for `while` and `for`. `title` already exists; every
    /// iteration gets a fresh body scope. A missing condition loops forever.
    pub(super) fn eval_loop(
        &self,
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: ExprId,
        body_scope: ScopeShape,
        title: &Environment,
    ) -> Result<Flow, EvalError> {
        if let Some(init) = init {
            value!(self.eval(init, title)?);
        }

        let mut last = Value::Null;
        loop {
            if let Some(cond) = cond {
                let test = value!(self.eval(cond, title)?);
                if !self.truth(&test, cond)? {
                    break;
                }
            }

            match self.eval(body, &title.child(body_scope))? {
                Flow::Normal(value) => last = value,
                Flow::Continue => {}
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }

            if let Some(step) = step {
                value!(self.eval(step, title)?);
            }
        }
        Ok(Flow::Normal(last))
    }
}
