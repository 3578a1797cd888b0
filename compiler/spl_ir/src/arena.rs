//! Flat storage for a program's syntax tree.

use crate::ast::{Expr, Param, ScopeShape};
use crate::{ExprId, ExprRange, ParamRange};

/// Contiguous storage for all expressions of one program.
///
/// Child lists (block statements, call arguments) and parameter lists are
/// kept in side vectors and referenced by range.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    params: Vec<Param>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get a mutable expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    /// Allocate an expression list, returning its range.
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len());
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len()) - start;
        ExprRange { start, len }
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len as usize]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = to_u32(self.params.len());
        self.params.extend(params);
        let len = to_u32(self.params.len()) - start;
        ParamRange { start, len }
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        let start = range.start as usize;
        &self.params[start..start + range.len as usize]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX entries"))
}

/// A parsed program: the arena, its top-level statements and the shape of
/// the global scope.
///
/// `scope` is all zeros until the resolver has run.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub arena: ExprArena,
    pub body: ExprRange,
    pub scope: ScopeShape,
}

impl Program {
    pub fn statements(&self) -> &[ExprId] {
        self.arena.get_expr_list(self.body)
    }
}
