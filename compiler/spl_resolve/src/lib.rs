//! Static scope resolution for SPL.
//!
//! Walks a built [`Program`] once, mirroring the environments the evaluator
//! will create at run time. Every variable occurrence gets a [`Place`]: either
//! a `(distance, slot)` pair into the environment chain, or [`Place::Global`]
//! for names no enclosing scope declares. Every scope-introducing node gets
//! the [`ScopeShape`] its runtime environment is sized from.
//!
//! Runtime scopes and their syntax:
//!
//! | Syntax                  | Context    |
//! |-------------------------|------------|
//! | program                 | `Global`   |
//! | function call           | `Function` |
//! | `while`/`for` header    | `LoopTitle`|
//! | branch or loop body     | `Sub`      |
//!
//! A bare `{ ... }` block does not open a scope of its own.

mod context;

use smallvec::SmallVec;
use spl_diagnostic::{Diagnostic, ErrorCode};
use spl_ir::{
    DeclKind, ExprArena, ExprId, ExprKind, Place, Program, ScopeKind, ScopeShape, SlotClass,
    Span, StringInterner, VarRef,
};
use spl_stack::ensure_sufficient_stack;
use thiserror::Error;
use tracing::{debug, trace};

use context::ContextStack;

/// What the resolver rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("`break` outside of a loop")]
    BreakOutsideLoop,
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop,
    #[error("cannot assign twice to constant `{0}`")]
    AssignToConst(String),
}

/// Fatal resolver error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    #[cold]
    fn new(kind: ResolveErrorKind, span: Span) -> Self {
        ResolveError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ResolveErrorKind::BreakOutsideLoop => ErrorCode::E2001,
            ResolveErrorKind::ContinueOutsideLoop => ErrorCode::E2002,
            ResolveErrorKind::AssignToConst(_) => ErrorCode::E2003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, "here");
        match self.kind {
            ResolveErrorKind::AssignToConst(_) => {
                diag.with_suggestion("declare it with `var` to make it reassignable")
            }
            _ => diag,
        }
    }
}

/// Resolve every variable in `program` and record scope shapes in place.
pub fn resolve(program: &mut Program, interner: &StringInterner) -> Result<(), ResolveError> {
    let statements: SmallVec<[ExprId; 16]> = SmallVec::from_slice(program.statements());
    let mut resolver = Resolver {
        arena: &mut program.arena,
        interner,
        contexts: ContextStack::new(),
    };
    for stmt in statements {
        resolver.expr(stmt)?;
    }
    let shape = resolver.contexts.pop();
    debug!(vars = shape.vars, consts = shape.consts, "resolved program");
    program.scope = shape;
    Ok(())
}

struct Resolver<'a> {
    arena: &'a mut ExprArena,
    interner: &'a StringInterner,
    contexts: ContextStack,
}

impl Resolver<'_> {
    fn expr(&mut self, id: ExprId) -> Result<(), ResolveError> {
        ensure_sufficient_stack(|| self.expr_inner(id))
    }

    fn opt(&mut self, id: Option<ExprId>) -> Result<(), ResolveError> {
        match id {
            Some(id) => self.expr(id),
            None => Ok(()),
        }
    }

    fn expr_inner(&mut self, id: ExprId) -> Result<(), ResolveError> {
        let expr = *self.arena.get_expr(id);
        match expr.kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::Str(_)
            | ExprKind::Null
            | ExprKind::Return(None) => Ok(()),

            ExprKind::Ident { name, .. } => {
                let place = self.contexts.lookup(name);
                self.set_kind(id, ExprKind::Ident {
                    name,
                    var: VarRef::reference(place),
                });
                Ok(())
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.expr(left)?;
                self.expr(right)
            }
            ExprKind::Return(Some(value)) => self.expr(value),

            ExprKind::Assign {
                target,
                decl,
                op,
                value,
                ..
            } => {
                // A declared name is already in scope for its own value, so
                // `var f = def (n) { f(n - 1) }` can recurse.
                let declared = match decl {
                    DeclKind::Var => Some(self.contexts.declare(target, SlotClass::Var)),
                    DeclKind::Const => Some(self.contexts.declare(target, SlotClass::Const)),
                    DeclKind::Plain => None,
                };
                self.expr(value)?;
                let var = match declared {
                    Some(var) => var,
                    None => match self.contexts.lookup(target) {
                        Place::Local {
                            class: SlotClass::Const,
                            ..
                        } => {
                            let name = self.interner.lookup(target).to_owned();
                            return Err(ResolveError::new(
                                ResolveErrorKind::AssignToConst(name),
                                expr.span,
                            ));
                        }
                        place @ Place::Local { .. } => VarRef::reference(place),
                        // A compound assignment reads its target first, so
                        // an undeclared one stays free.
                        _ if op.is_some() => VarRef::reference(Place::Global),
                        _ => self.contexts.declare(target, SlotClass::Var),
                    },
                };
                self.set_kind(id, ExprKind::Assign {
                    target,
                    var,
                    decl,
                    op,
                    value,
                });
                Ok(())
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.expr(cond)?;
                let then_scope = self.scoped(ScopeKind::Sub, |this| this.expr(then_branch))?;
                let else_scope = match else_branch {
                    Some(branch) => self.scoped(ScopeKind::Sub, |this| this.expr(branch))?,
                    None => ScopeShape::new(ScopeKind::Sub),
                };
                self.set_kind(id, ExprKind::If {
                    cond,
                    then_branch,
                    else_branch,
                    then_scope,
                    else_scope,
                });
                Ok(())
            }
            ExprKind::While { cond, body, .. } => {
                let mut body_scope = ScopeShape::new(ScopeKind::Sub);
                let title = self.scoped(ScopeKind::LoopTitle, |this| {
                    this.expr(cond)?;
                    body_scope = this.loop_body(body)?;
                    Ok(())
                })?;
                self.set_kind(id, ExprKind::While {
                    cond,
                    body,
                    title,
                    body_scope,
                });
                Ok(())
            }
            ExprKind::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                let mut body_scope = ScopeShape::new(ScopeKind::Sub);
                let title = self.scoped(ScopeKind::LoopTitle, |this| {
                    this.opt(init)?;
                    this.opt(cond)?;
                    this.opt(step)?;
                    body_scope = this.loop_body(body)?;
                    Ok(())
                })?;
                self.set_kind(id, ExprKind::For {
                    init,
                    cond,
                    step,
                    body,
                    title,
                    body_scope,
                });
                Ok(())
            }

            ExprKind::Def {
                name,
                binding,
                params,
                body,
                ..
            } => {
                let binding = binding.map(|_| self.contexts.declare(name, SlotClass::Var));

                // Defaults are evaluated in the defining environment.
                let params_list: SmallVec<[_; 8]> =
                    SmallVec::from_slice(self.arena.get_params(params));
                for param in &params_list {
                    self.opt(param.default)?;
                }

                self.contexts.push(ScopeKind::Function);
                for param in &params_list {
                    self.contexts.declare(param.name, SlotClass::Var);
                }
                let result = self.expr(body);
                let frame = self.contexts.pop();
                result?;

                trace!(
                    name = self.interner.lookup(name),
                    vars = frame.vars,
                    consts = frame.consts,
                    "resolved function"
                );
                self.set_kind(id, ExprKind::Def {
                    name,
                    binding,
                    params,
                    body,
                    frame,
                });
                Ok(())
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee)?;
                let args: SmallVec<[ExprId; 8]> =
                    SmallVec::from_slice(self.arena.get_expr_list(args));
                for arg in args {
                    self.expr(arg)?;
                }
                Ok(())
            }

            ExprKind::Block(stmts) => {
                let stmts: SmallVec<[ExprId; 16]> =
                    SmallVec::from_slice(self.arena.get_expr_list(stmts));
                for stmt in stmts {
                    self.expr(stmt)?;
                }
                Ok(())
            }
            ExprKind::Break => {
                if self.contexts.in_loop() {
                    Ok(())
                } else {
                    Err(ResolveError::new(ResolveErrorKind::BreakOutsideLoop, expr.span))
                }
            }
            ExprKind::Continue => {
                if self.contexts.in_loop() {
                    Ok(())
                } else {
                    Err(ResolveError::new(
                        ResolveErrorKind::ContinueOutsideLoop,
                        expr.span,
                    ))
                }
            }
        }
    }

    /// Run `f` inside a fresh context of `kind`, returning that context's shape.
    fn scoped(
        &mut self,
        kind: ScopeKind,
        f: impl FnOnce(&mut Self) -> Result<(), ResolveError>,
    ) -> Result<ScopeShape, ResolveError> {
        self.contexts.push(kind);
        let result = f(self);
        let shape = self.contexts.pop();
        result.map(|()| shape)
    }

    fn loop_body(&mut self, body: ExprId) -> Result<ScopeShape, ResolveError> {
        self.contexts.enter_loop();
        let result = self.scoped(ScopeKind::Sub, |this| this.expr(body));
        self.contexts.exit_loop();
        result
    }

    fn set_kind(&mut self, id: ExprId, kind: ExprKind) {
        self.arena.get_expr_mut(id).kind = kind;
    }
}

#[cfg(test)]
mod tests;
