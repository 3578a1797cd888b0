//! Builder frames and the partial items they accumulate.

use spl_ir::{AssignOp, BinaryOp, DeclKind, ExprId, Name, ParamRange, Span, UnaryOp};

/// Operand or operator of the expression currently being collected.
#[derive(Copy, Clone, Debug)]
pub(crate) enum RunItem {
    Operand(ExprId),
    Binary { op: BinaryOp, prec: u32, span: Span },
    Compound { op: AssignOp, prec: u32, span: Span },
    Unary { op: UnaryOp, prec: u32, span: Span },
    Return { prec: u32, span: Span },
}

impl RunItem {
    pub(crate) fn operand(self) -> Option<ExprId> {
        match self {
            RunItem::Operand(id) => Some(id),
            _ => None,
        }
    }
}

/// Entry on a frame's item stack.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Item {
    Run(RunItem),
    /// Finished expression waiting to be welded into its statement.
    Node(ExprId),
    Assign {
        target: Name,
        decl: DeclKind,
        span: Span,
    },
    If {
        cond: ExprId,
        span: Span,
    },
    Else {
        span: Span,
    },
    While {
        cond: ExprId,
        span: Span,
    },
    For {
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        span: Span,
    },
    Def {
        name: Name,
        anonymous: bool,
        params: ParamRange,
        span: Span,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Construct {
    If,
    While,
    For,
}

#[derive(Copy, Clone, Debug)]
pub(crate) enum FrameKind {
    Root,
    Block,
    Call { callee: ExprId },
    Condition(Construct),
    Params { name: Name, anonymous: bool },
}

impl FrameKind {
    /// Delimiter that closes this frame.
    pub(crate) fn closer(self) -> char {
        match self {
            FrameKind::Root => '\0',
            FrameKind::Block => '}',
            FrameKind::Call { .. } | FrameKind::Condition(_) | FrameKind::Params { .. } => ')',
        }
    }

    pub(crate) fn opener(self) -> char {
        match self {
            FrameKind::Root => '\0',
            FrameKind::Block => '{',
            FrameKind::Call { .. } | FrameKind::Condition(_) | FrameKind::Params { .. } => '(',
        }
    }
}

/// One nesting level of the builder.
#[derive(Debug)]
pub(crate) struct Frame {
    pub kind: FrameKind,
    pub items: Vec<Item>,
    /// Statements finished since the last part separator (or frame start).
    pub lines: Vec<ExprId>,
    /// Comma/semicolon separated parts of call, header and parameter frames.
    pub parts: Vec<Option<ExprId>>,
    /// Spans of open grouping parentheses; their count is the paren depth.
    pub groups: Vec<Span>,
    pub open_span: Span,
}

impl Frame {
    pub(crate) fn new(kind: FrameKind, open_span: Span) -> Self {
        Frame {
            kind,
            items: Vec::new(),
            lines: Vec::new(),
            parts: Vec::new(),
            groups: Vec::new(),
            open_span,
        }
    }

    /// Whether operands or operators are waiting to be assembled.
    pub(crate) fn in_expr(&self) -> bool {
        matches!(self.items.last(), Some(Item::Run(_)))
    }

    /// Index where the trailing run of operands and operators starts.
    pub(crate) fn run_start(&self) -> usize {
        self.items
            .iter()
            .rposition(|item| !matches!(item, Item::Run(_)))
            .map_or(0, |i| i + 1)
    }
}
