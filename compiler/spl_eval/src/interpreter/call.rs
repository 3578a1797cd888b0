//! Function definition and calls.

use std::rc::Rc;

use smallvec::SmallVec;
use spl_ir::{
    ExprId, ExprRange, Name, ParamRange, Place, ScopeKind, ScopeShape, SlotClass, Span, VarRef,
};
use tracing::trace;

use super::{Flow, Interpreter};
use crate::environment::Environment;
use crate::errors::{
    internal, missing_argument, not_callable, too_many_arguments, EvalError, EvalResult,
};
use crate::value::{FunctionValue, Value};

impl Interpreter<'_> {
    /// Create a function capturing `env` and bind it to its name.
    ///
    /// Named functions defined at the top level are also published to the
    /// global map, so functions defined earlier can call them.
    #[expect(clippy::too_many_arguments, reason = "mirrors the fields of a definition node")]
    pub(super) fn define(
        &self,
        span: Span,
        name: Name,
        binding: Option<VarRef>,
        params: ParamRange,
        body: ExprId,
        frame: ScopeShape,
        env: &Environment,
    ) -> EvalResult {
        let function = Value::Function(Rc::new(FunctionValue {
            name: Rc::from(self.interner.lookup(name)),
            params,
            body,
            frame,
            captured: env.clone(),
            span,
        }));
        if let Some(binding) = binding {
            self.write(binding.place, name, function.clone(), env)?;
            if env.kind() == ScopeKind::Global {
                env.publish_global(name, function.clone());
            }
        }
        Ok(function)
    }

    pub(super) fn eval_call(
        &self,
        callee: ExprId,
        args: ExprRange,
        env: &Environment,
    ) -> Result<Flow, EvalError> {
        let callee_value = value!(self.eval(callee, env)?);
        let function = match callee_value {
            Value::Function(function) => function,
            other => return Err(not_callable(&other).with_span(self.span_of(callee))),
        };

        let arg_ids = self.program.arena.get_expr_list(args);
        let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(arg_ids.len());
        for &arg in arg_ids {
            values.push(value!(self.eval(arg, env)?));
        }
        self.call(&function, values).map(Flow::Normal)
    }

    /// Call `function` with already evaluated positional arguments.
    ///
    /// Missing trailing arguments fall back to parameter defaults, which are
    /// evaluated in the environment the function was defined in.
    pub fn call(&self, function: &FunctionValue, args: SmallVec<[Value; 4]>) -> EvalResult {
        let params = self.program.arena.get_params(function.params);
        if args.len() > params.len() {
            return Err(too_many_arguments(&function.name, params.len(), args.len()));
        }
        trace!(function = %function.name, args = args.len(), "call");

        let frame = function.captured.child(function.frame);
        let mut args = args.into_iter();
        for (slot, param) in (0u32..).zip(params) {
            let value = match (args.next(), param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_value(default, &function.captured)?,
                (None, None) => {
                    return Err(missing_argument(
                        &function.name,
                        self.interner.lookup(param.name),
                    ));
                }
            };
            let place = Place::Local {
                distance: 0,
                slot,
                class: SlotClass::Var,
            };
            self.write(place, param.name, value, &frame)?;
        }

        match self.eval(function.body, &frame)? {
            Flow::Normal(value) | Flow::Return(value) => Ok(value),
            Flow::Break | Flow::Continue => Err(internal("loop control escaped a function body")),
        }
    }
}
