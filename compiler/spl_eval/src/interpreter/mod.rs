//! Tree-walking interpreter over a resolved [`Program`].

/// Unwrap a [`Flow::Normal`] value, returning any other flow to the caller.
macro_rules! value {
    ($flow:expr) => {
        match $flow {
            Flow::Normal(value) => value,
            other => return Ok(other),
        }
    };
}

mod call;
mod control;

use rustc_hash::FxHashMap;
use spl_ir::{Expr, ExprId, ExprKind, Name, Place, Program, Span, StringInterner};
use spl_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::environment::{Environment, Globals, LookupError};
use crate::errors::{internal, undefined_variable, uninitialized, EvalError, EvalResult};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

/// How evaluation of a node completed.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Normal(Value),
    Break,
    Continue,
    Return(Value),
}

/// Evaluator for one resolved program.
///
/// Each [`interpret`](Self::interpret) call is an independent run with a
/// fresh global environment and global map.
pub struct Interpreter<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    seeds: FxHashMap<Name, Value>,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a Program, interner: &'a StringInterner) -> Self {
        Interpreter {
            program,
            interner,
            seeds: FxHashMap::default(),
        }
    }

    /// Pre-seed the global map of every run with `name = value`.
    #[must_use]
    pub fn with_global(mut self, name: &str, value: Value) -> Self {
        let name = self.interner.intern(name);
        self.seeds.insert(name, value);
        self
    }

    /// Run the program, returning the value of its last statement or of a
    /// top-level `return`.
    pub fn interpret(&self) -> EvalResult {
        let globals = Globals::new(self.seeds.clone());
        let env = Environment::global(self.program.scope, globals);
        debug!(
            statements = self.program.statements().len(),
            vars = self.program.scope.vars,
            "interpret"
        );

        let mut last = Value::Null;
        for &stmt in self.program.statements() {
            match self.eval(stmt, &env)? {
                Flow::Normal(value) => last = value,
                Flow::Return(value) => {
                    debug!(result = %value, "program returned");
                    return Ok(value);
                }
                Flow::Break | Flow::Continue => {
                    return Err(internal("loop control reached the top level"));
                }
            }
        }
        debug!(result = %last, "program finished");
        Ok(last)
    }

    /// Evaluate one node in `env`.
    pub fn eval(&self, id: ExprId, env: &Environment) -> Result<Flow, EvalError> {
        let expr = *self.program.arena.get_expr(id);
        ensure_sufficient_stack(|| self.eval_inner(expr, env))
            .map_err(|err| err.with_span(expr.span))
    }

    fn eval_inner(&self, expr: Expr, env: &Environment) -> Result<Flow, EvalError> {
        let value = match expr.kind {
            ExprKind::Int(n) => Value::Int(n),
            ExprKind::Float(bits) => Value::Float(f64::from_bits(bits)),
            ExprKind::Bool(b) => Value::Bool(b),
            ExprKind::Str(name) => Value::string(self.interner.lookup(name)),
            ExprKind::Null => Value::Null,
            ExprKind::Ident { name, var } => self.read(var.place, name, env)?,

            ExprKind::Unary { op, operand } => {
                let operand = value!(self.eval(operand, env)?);
                evaluate_unary(operand, op)?
            }
            ExprKind::Binary { op, left, right } if op.is_short_circuit() => {
                return self.eval_logical(op, left, right, env);
            }
            ExprKind::Binary { op, left, right } => {
                let left = value!(self.eval(left, env)?);
                let right = value!(self.eval(right, env)?);
                evaluate_binary(left, right, op)?
            }
            ExprKind::Assign {
                target,
                var,
                op,
                value,
                ..
            } => {
                let mut value = value!(self.eval(value, env)?);
                if let Some(op) = op {
                    let current = self.read(var.place, target, env)?;
                    value = evaluate_binary(current, value, op.binary())?;
                }
                self.write(var.place, target, value.clone(), env)?;
                value
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
                then_scope,
                else_scope,
            } => {
                return self.eval_if(cond, then_branch, else_branch, (then_scope, else_scope), env);
            }
            ExprKind::While {
                cond,
                body,
                title,
                body_scope,
            } => {
                let title = env.child(title);
                return self.eval_loop(None, Some(cond), None, body, body_scope, &title);
            }
            ExprKind::For {
                init,
                cond,
                step,
                body,
                title,
                body_scope,
            } => {
                let title = env.child(title);
                return self.eval_loop(init, cond, step, body, body_scope, &title);
            }

            ExprKind::Def {
                name,
                binding,
                params,
                body,
                frame,
            } => self.define(expr.span, name, binding, params, body, frame, env)?,
            ExprKind::Call { callee, args } => return self.eval_call(callee, args, env),

            ExprKind::Block(stmts) => {
                let mut last = Value::Null;
                for &stmt in self.program.arena.get_expr_list(stmts) {
                    last = value!(self.eval(stmt, env)?);
                }
                last
            }
            ExprKind::Break => return Ok(Flow::Break),
            ExprKind::Continue => return Ok(Flow::Continue),
            ExprKind::Return(None) => return Ok(Flow::Return(Value::Null)),
            ExprKind::Return(Some(value)) => {
                let value = value!(self.eval(value, env)?);
                return Ok(Flow::Return(value));
            }
        };
        Ok(Flow::Normal(value))
    }

    /// Evaluate a node whose value is needed outside any loop or call
    /// boundary, such as a default argument.
    fn eval_value(&self, id: ExprId, env: &Environment) -> EvalResult {
        match self.eval(id, env)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break | Flow::Continue => Err(internal("loop control escaped an expression")),
        }
    }

    fn read(&self, place: Place, name: Name, env: &Environment) -> EvalResult {
        env.lookup(place, name)
            .map_err(|err| self.lookup_error(err, name))
    }

    fn write(
        &self,
        place: Place,
        name: Name,
        value: Value,
        env: &Environment,
    ) -> Result<(), EvalError> {
        env.assign(place, name, value)
            .map_err(|err| self.lookup_error(err, name))
    }

    #[cold]
    fn lookup_error(&self, err: LookupError, name: Name) -> EvalError {
        let text = self.interner.lookup(name);
        match err {
            LookupError::Undefined => undefined_variable(text),
            LookupError::Uninitialized => uninitialized(text),
            LookupError::BadAddress => internal("variable address outside the environment chain"),
        }
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.program.arena.get_expr(id).span
    }
}
