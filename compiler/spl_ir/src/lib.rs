//! SPL IR - shared data structures for every interpreter phase.
//!
//! - Spans for source locations
//! - Names for interned identifiers
//! - Tokens and `TokenList` for lexer output
//! - The flat expression arena produced by the builder and annotated by the
//!   resolver
//! - Static operator, precedence and reserved-word tables
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Annotate in place**: the resolver writes variable addresses and scope
//!   shapes back into the arena, the evaluator reads them

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod span;
mod token;

pub use arena::{ExprArena, Program};
pub use ast::{
    is_reserved_word, AssignOp, BinaryOp, DeclKind, Expr, ExprKind, Param, Place, RefKind,
    ScopeKind, ScopeShape, SlotClass, UnaryOp, VarRef,
};
pub use expr_id::{ExprId, ExprRange, ParamRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
