//! Syntax tree node types.
//!
//! Nodes live in an [`ExprArena`](crate::ExprArena) and refer to each other
//! through [`ExprId`]. The builder creates them with unresolved variable
//! references and default scope shapes; the resolver fills both in.

mod dump;
mod operators;
mod scope;

pub use dump::dump_program;
pub use operators::{
    is_reserved_word, AssignOp, BinaryOp, UnaryOp, COMPOUND_ASSIGN_PRECEDENCE, GROUP_PRECEDENCE,
    RESERVED_WORDS, RETURN_PRECEDENCE,
};
pub use scope::{DeclKind, Place, RefKind, ScopeKind, ScopeShape, SlotClass, VarRef};

use crate::{ExprId, ExprRange, Name, ParamRange, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
///
/// Statements are expressions too: every node evaluates to a value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    // Literals
    Int(i64),
    /// Stored as bits for `Eq + Hash`.
    Float(u64),
    Bool(bool),
    Str(Name),
    Null,

    Ident {
        name: Name,
        var: VarRef,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `target = value`, `var target = value`, `const target = value` or a
    /// compound `target op= value`.
    Assign {
        target: Name,
        var: VarRef,
        decl: DeclKind,
        op: Option<AssignOp>,
        value: ExprId,
    },

    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
        then_scope: ScopeShape,
        else_scope: ScopeShape,
    },
    While {
        cond: ExprId,
        body: ExprId,
        title: ScopeShape,
        body_scope: ScopeShape,
    },
    For {
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: ExprId,
        title: ScopeShape,
        body_scope: ScopeShape,
    },

    /// Function definition. `binding` is `None` for anonymous functions,
    /// which are only reachable through the value they evaluate to.
    Def {
        name: Name,
        binding: Option<VarRef>,
        params: ParamRange,
        body: ExprId,
        frame: ScopeShape,
    },
    Call {
        callee: ExprId,
        args: ExprRange,
    },

    Block(ExprRange),
    Break,
    Continue,
    Return(Option<ExprId>),
}

/// Function parameter. Parameters occupy var slots `0..n` of the call frame
/// in declaration order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub default: Option<ExprId>,
    pub span: Span,
}
