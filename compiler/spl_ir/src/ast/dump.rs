//! Compact S-expression rendering of a program.
//!
//! Used by `splc ast` and by tests that compare tree shapes. Resolved
//! variables are suffixed with their place, e.g. `x@(1, 0)` or `f@global`.

use std::fmt::Write;

use super::{DeclKind, ExprKind, Place};
use crate::{ExprId, Program, StringInterner};

pub fn dump_program(program: &Program, interner: &StringInterner) -> String {
    let mut out = String::new();
    let mut dumper = Dumper {
        program,
        interner,
        out: &mut out,
    };
    for (i, &stmt) in program.statements().iter().enumerate() {
        if i > 0 {
            dumper.out.push_str("; ");
        }
        dumper.expr(stmt);
    }
    out
}

struct Dumper<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    out: &'a mut String,
}

impl Dumper<'_> {
    fn name(&mut self, name: crate::Name, place: Place) {
        self.out.push_str(self.interner.lookup(name));
        if !matches!(place, Place::Unresolved) {
            let _ = write!(self.out, "@{place:?}");
        }
    }

    fn opt(&mut self, id: Option<ExprId>) {
        match id {
            Some(id) => self.expr(id),
            None => self.out.push('_'),
        }
    }

    fn expr(&mut self, id: ExprId) {
        let program = self.program;
        let arena = &program.arena;
        match &arena.get_expr(id).kind {
            ExprKind::Int(v) => {
                let _ = write!(self.out, "{v}");
            }
            ExprKind::Float(bits) => {
                let _ = write!(self.out, "{:?}", f64::from_bits(*bits));
            }
            ExprKind::Bool(b) => {
                let _ = write!(self.out, "{b}");
            }
            ExprKind::Str(name) => {
                let _ = write!(self.out, "{:?}", self.interner.lookup(*name));
            }
            ExprKind::Null => self.out.push_str("null"),
            ExprKind::Ident { name, var } => self.name(*name, var.place),
            ExprKind::Unary { op, operand } => {
                let _ = write!(self.out, "({} ", op.as_symbol());
                self.expr(*operand);
                self.out.push(')');
            }
            ExprKind::Binary { op, left, right } => {
                let _ = write!(self.out, "({} ", op.as_symbol());
                self.expr(*left);
                self.out.push(' ');
                self.expr(*right);
                self.out.push(')');
            }
            ExprKind::Assign {
                target,
                var,
                decl,
                op,
                value,
            } => {
                let head = match (op, decl) {
                    (Some(op), _) => format!("{}=", op.binary().as_symbol()),
                    (None, DeclKind::Plain) => "=".to_owned(),
                    (None, DeclKind::Var) => "var".to_owned(),
                    (None, DeclKind::Const) => "const".to_owned(),
                };
                let _ = write!(self.out, "({head} ");
                self.name(*target, var.place);
                self.out.push(' ');
                self.expr(*value);
                self.out.push(')');
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.out.push_str("(if ");
                self.expr(*cond);
                self.out.push(' ');
                self.expr(*then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push(' ');
                    self.expr(*else_branch);
                }
                self.out.push(')');
            }
            ExprKind::While { cond, body, .. } => {
                self.out.push_str("(while ");
                self.expr(*cond);
                self.out.push(' ');
                self.expr(*body);
                self.out.push(')');
            }
            ExprKind::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                self.out.push_str("(for ");
                self.opt(*init);
                self.out.push(' ');
                self.opt(*cond);
                self.out.push(' ');
                self.opt(*step);
                self.out.push(' ');
                self.expr(*body);
                self.out.push(')');
            }
            ExprKind::Def {
                name,
                binding,
                params,
                body,
                ..
            } => {
                self.out.push_str("(def ");
                self.name(*name, binding.map_or(Place::Unresolved, |b| b.place));
                self.out.push_str(" (");
                for (i, param) in arena.get_params(*params).iter().enumerate() {
                    if i > 0 {
                        self.out.push(' ');
                    }
                    self.out.push_str(self.interner.lookup(param.name));
                    if let Some(default) = param.default {
                        self.out.push('=');
                        self.expr(default);
                    }
                }
                self.out.push_str(") ");
                self.expr(*body);
                self.out.push(')');
            }
            ExprKind::Call { callee, args } => {
                self.out.push_str("(call ");
                self.expr(*callee);
                for &arg in arena.get_expr_list(*args) {
                    self.out.push(' ');
                    self.expr(arg);
                }
                self.out.push(')');
            }
            ExprKind::Block(stmts) => {
                self.out.push('{');
                for (i, &stmt) in arena.get_expr_list(*stmts).iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("; ");
                    }
                    self.expr(stmt);
                }
                self.out.push('}');
            }
            ExprKind::Break => self.out.push_str("break"),
            ExprKind::Continue => self.out.push_str("continue"),
            ExprKind::Return(None) => self.out.push_str("return"),
            ExprKind::Return(Some(value)) => {
                self.out.push_str("(return ");
                self.expr(*value);
                self.out.push(')');
            }
        }
    }
}
