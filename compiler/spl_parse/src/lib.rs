//! AST builder for SPL.
//!
//! Turns a flat token stream into a tree in a single left-to-right pass. The
//! builder keeps an explicit stack of frames (one per open block, call,
//! parenthesised header or parameter list). Within a frame, operands and
//! operators accumulate until a boundary, where the
//! [`assemble`](crate::assemble) step folds them by precedence and the line is
//! welded into a statement.
//!
//! Parenthesised sub-expressions are not separate frames: each open group adds
//! a fixed amount of extra precedence to the operators inside it.

mod assemble;
mod builder;
mod frame;

pub use builder::AstBuilder;

use spl_diagnostic::{Diagnostic, ErrorCode};
use spl_ir::{Program, Span, StringInterner, TokenList};
use thiserror::Error;

/// What went wrong while building the tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected `{0}`")]
    UnexpectedToken(String),
    #[error("unmatched `)`")]
    UnmatchedParen,
    #[error("expected {0}")]
    ExpectedExpression(&'static str),
    #[error("expected `;` before this expression")]
    MissingSeparator,
    #[error("unclosed `{0}`")]
    UnclosedDelimiter(char),
    #[error("mismatched delimiter: expected `{expected}`, found `{found}`")]
    MismatchedDelimiter { expected: char, found: char },
    #[error("invalid assignment target")]
    InvalidAssignTarget,
    #[error("`for` header has {0} parts, expected 3")]
    InvalidForHeader(usize),
    #[error("expected `(` after `{0}`")]
    ExpectedParen(&'static str),
    #[error("expected `{{` to start the function body")]
    MissingFunctionBody,
    #[error("`{0}` is reserved but not supported")]
    Unsupported(String),
    #[error("for-each loops are not supported")]
    ForEachUnsupported,
    #[error("`else` without a preceding `if`")]
    ElseWithoutIf,
    #[error("invalid parameter, expected `name` or `name = default`")]
    InvalidParameter,
}

/// Fatal builder error. The build aborts at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// Opening delimiter of the construct the error closes, if any.
    pub opened: Option<Span>,
}

impl ParseError {
    #[cold]
    pub(crate) fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            opened: None,
        }
    }

    #[must_use]
    pub(crate) fn with_opening(mut self, open: Span) -> Self {
        self.opened = Some(open);
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken(_) | ParseErrorKind::UnmatchedParen => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression(_) => ErrorCode::E1002,
            ParseErrorKind::MissingSeparator => ErrorCode::E1003,
            ParseErrorKind::UnclosedDelimiter(_) => ErrorCode::E1004,
            ParseErrorKind::MismatchedDelimiter { .. } => ErrorCode::E1005,
            ParseErrorKind::InvalidAssignTarget => ErrorCode::E1006,
            ParseErrorKind::InvalidForHeader(_) => ErrorCode::E1007,
            ParseErrorKind::ExpectedParen(_) | ParseErrorKind::MissingFunctionBody => {
                ErrorCode::E1008
            }
            ParseErrorKind::Unsupported(_) => ErrorCode::E1009,
            ParseErrorKind::ForEachUnsupported => ErrorCode::E1010,
            ParseErrorKind::ElseWithoutIf => ErrorCode::E1011,
            ParseErrorKind::InvalidParameter => ErrorCode::E1012,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, "here");
        if let Some(open) = self.opened {
            diag = diag.with_secondary_label(open, "opened here");
        }
        match self.kind {
            ParseErrorKind::MissingSeparator => {
                diag.with_suggestion("separate statements with `;`")
            }
            ParseErrorKind::ForEachUnsupported => {
                diag.with_suggestion("use a three-part header: `for (init; cond; step)`")
            }
            ParseErrorKind::UnclosedDelimiter(_) => diag.with_note("the delimiter opened here"),
            _ => diag,
        }
    }
}

/// Build the syntax tree for a token list.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<Program, ParseError> {
    AstBuilder::new(tokens, interner).build()
}
