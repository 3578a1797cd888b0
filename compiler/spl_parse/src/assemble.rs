//! Precedence fold over a flat run of operands and operators.
//!
//! Repeatedly picks the ready operator with the highest effective precedence
//! (leftmost on ties, which makes equal-precedence chains left-associative)
//! and splices it together with its operands into a single node. An operator
//! is ready once its operands are already folded: binary operators need an
//! operand on both sides, prefix operators one on the right.

use smallvec::SmallVec;
use spl_ir::{DeclKind, Expr, ExprArena, ExprId, ExprKind, Span, VarRef};

use crate::frame::RunItem;
use crate::{ParseError, ParseErrorKind};

/// Fold `items` into one expression.
///
/// `items` must be non-empty.
pub(crate) fn assemble(
    items: SmallVec<[RunItem; 8]>,
    arena: &mut ExprArena,
) -> Result<ExprId, ParseError> {
    let mut items = items;

    loop {
        if let [RunItem::Operand(id)] = items.as_slice() {
            return Ok(*id);
        }

        let Some(best) = pick(&items) else {
            return Err(stuck(&items, arena));
        };

        match items[best] {
            RunItem::Binary { op, span, .. } => {
                let (left, right) = neighbours(&items, best);
                let span = arena.get_expr(left).span.merge(arena.get_expr(right).span).merge(span);
                let id = arena.alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span));
                items.drain(best - 1..=best + 1);
                items.insert(best - 1, RunItem::Operand(id));
            }
            RunItem::Compound { op, span, .. } => {
                let (left, value) = neighbours(&items, best);
                let target_expr = arena.get_expr(left);
                let ExprKind::Ident { name, .. } = target_expr.kind else {
                    return Err(ParseError::new(ParseErrorKind::InvalidAssignTarget, target_expr.span));
                };
                let span = target_expr.span.merge(arena.get_expr(value).span).merge(span);
                let id = arena.alloc_expr(Expr::new(
                    ExprKind::Assign {
                        target: name,
                        var: VarRef::UNRESOLVED,
                        decl: DeclKind::Plain,
                        op: Some(op),
                        value,
                    },
                    span,
                ));
                items.drain(best - 1..=best + 1);
                items.insert(best - 1, RunItem::Operand(id));
            }
            RunItem::Unary { op, span, .. } => {
                let operand = right_operand(&items, best);
                let span = span.merge(arena.get_expr(operand).span);
                let id = arena.alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span));
                items.drain(best..=best + 1);
                items.insert(best, RunItem::Operand(id));
            }
            RunItem::Return { span, .. } => {
                if best + 1 < items.len() {
                    let value = right_operand(&items, best);
                    let span = span.merge(arena.get_expr(value).span);
                    let id = arena.alloc_expr(Expr::new(ExprKind::Return(Some(value)), span));
                    items.drain(best..=best + 1);
                    items.insert(best, RunItem::Operand(id));
                } else {
                    let id = arena.alloc_expr(Expr::new(ExprKind::Return(None), span));
                    items[best] = RunItem::Operand(id);
                }
            }
            RunItem::Operand(_) => unreachable!("pick never selects an operand"),
        }
    }
}

/// Index of the ready operator with the strictly highest precedence.
fn pick(items: &[RunItem]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, item) in items.iter().enumerate() {
        let prec = match *item {
            RunItem::Operand(_) => continue,
            RunItem::Binary { prec, .. } | RunItem::Compound { prec, .. } => {
                if !is_operand(items, i.wrapping_sub(1)) || !is_operand(items, i + 1) {
                    continue;
                }
                prec
            }
            RunItem::Unary { prec, .. } => {
                if !is_operand(items, i + 1) {
                    continue;
                }
                prec
            }
            RunItem::Return { prec, .. } => {
                if i + 1 < items.len() && !is_operand(items, i + 1) {
                    continue;
                }
                prec
            }
        };
        if best.map_or(true, |(_, p)| prec > p) {
            best = Some((i, prec));
        }
    }
    best.map(|(i, _)| i)
}

fn is_operand(items: &[RunItem], index: usize) -> bool {
    matches!(items.get(index), Some(RunItem::Operand(_)))
}

fn neighbours(items: &[RunItem], index: usize) -> (ExprId, ExprId) {
    let left = items[index - 1].operand().unwrap_or(ExprId::INVALID);
    let right = items[index + 1].operand().unwrap_or(ExprId::INVALID);
    (left, right)
}

fn right_operand(items: &[RunItem], index: usize) -> ExprId {
    items[index + 1].operand().unwrap_or(ExprId::INVALID)
}

/// Error for a run that cannot be folded further.
#[cold]
fn stuck(items: &[RunItem], arena: &ExprArena) -> ParseError {
    let span_of = |item: &RunItem| -> Span {
        match *item {
            RunItem::Operand(id) => arena.get_expr(id).span,
            RunItem::Binary { span, .. }
            | RunItem::Compound { span, .. }
            | RunItem::Unary { span, .. }
            | RunItem::Return { span, .. } => span,
        }
    };

    if let Some(op) = items.iter().find(|item| !matches!(item, RunItem::Operand(_))) {
        return ParseError::new(ParseErrorKind::ExpectedExpression("an operand"), span_of(op));
    }
    // Only operands remain: two expressions with nothing between them.
    let second = items.get(1).map_or(Span::DUMMY, span_of);
    ParseError::new(ParseErrorKind::MissingSeparator, second)
}
