//! Runtime errors and their constructors.
//!
//! Constructors are `#[cold]` and return errors without a span; the
//! interpreter attaches the span of the innermost node that failed.

use spl_diagnostic::{Diagnostic, ErrorCode};
use spl_ir::{BinaryOp, Span, UnaryOp};
use thiserror::Error;

use crate::value::Value;

pub type EvalResult = Result<Value, EvalError>;

/// Typed category of a runtime error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Names
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },
    #[error("variable `{name}` was read before it was assigned")]
    Uninitialized { name: String },

    // Calls
    #[error("missing argument `{param}` in call to `{function}`")]
    MissingArgument { function: String, param: String },
    #[error("`{type_name}` value is not callable")]
    NotCallable { type_name: &'static str },
    #[error("`{function}` takes {expected} argument(s) but {got} were supplied")]
    TooManyArguments {
        function: String,
        expected: usize,
        got: usize,
    },

    // Types
    #[error("expected `{expected}`, found `{got}`")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("cannot apply `{op}` to `{left}` and `{right}`")]
    InvalidBinaryOp {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("cannot apply `{op}` to `{type_name}`")]
    InvalidUnaryOp {
        op: &'static str,
        type_name: &'static str,
    },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("internal error: {0}")]
    Internal(&'static str),
}

/// A runtime error with the location of the node that raised it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless an inner node already did.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E6001,
            EvalErrorKind::Uninitialized { .. } => ErrorCode::E6002,
            EvalErrorKind::MissingArgument { .. } => ErrorCode::E6003,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E6004,
            EvalErrorKind::TypeMismatch { .. }
            | EvalErrorKind::InvalidBinaryOp { .. }
            | EvalErrorKind::InvalidUnaryOp { .. } => ErrorCode::E6005,
            EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero => ErrorCode::E6006,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6007,
            EvalErrorKind::TooManyArguments { .. } => ErrorCode::E6008,
            EvalErrorKind::Internal(_) => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        let diag = match self.span {
            Some(span) => diag.with_label(span, "raised here"),
            None => diag,
        };
        match self.kind {
            EvalErrorKind::UndefinedVariable { .. } => {
                diag.with_note("free names are looked up in the global scope when read")
            }
            EvalErrorKind::MissingArgument { .. } => {
                diag.with_suggestion("pass the argument or give the parameter a default")
            }
            _ => diag,
        }
    }
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn uninitialized(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Uninitialized {
        name: name.to_owned(),
    })
}

#[cold]
pub fn missing_argument(function: &str, param: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        function: function.to_owned(),
        param: param.to_owned(),
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

#[cold]
pub fn too_many_arguments(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments {
        function: function.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected,
        got: got.type_name(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op: op.as_symbol(),
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        op: op.as_symbol(),
        type_name: operand.type_name(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn internal(message: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal(message))
}
