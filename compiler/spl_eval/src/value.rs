//! Runtime values.

use std::fmt;
use std::rc::Rc;

use spl_ir::{ExprId, ParamRange, ScopeShape, Span};

use crate::environment::Environment;

/// A runtime value.
///
/// Cloning is cheap: strings and functions are reference counted.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Function(Rc<FunctionValue>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Name of the value's type as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Function(_) => "function",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Strict equality: same type and same value. Functions compare by identity.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Loose equality: like [`strict_eq`](Self::strict_eq), except ints and
    /// floats compare by numeric value.
    #[expect(clippy::cast_precision_loss, reason = "int/float comparison promotes to float")]
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            _ => self.strict_eq(other),
        }
    }
}

/// Tests compare values strictly.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => write!(f, "<function {}>", func.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// A function created by executing a definition.
///
/// Holds the definition's pieces by id; the arena that owns them must outlive
/// every call. The captured environment is the one the definition ran in.
pub struct FunctionValue {
    pub name: Rc<str>,
    pub params: ParamRange,
    pub body: ExprId,
    pub frame: ScopeShape,
    pub captured: Environment,
    pub span: Span,
}

impl FunctionValue {
    pub fn arity(&self) -> usize {
        self.params.len as usize
    }
}

// The captured environment can contain the function itself.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
    }

    #[test]
    fn strict_and_loose_equality() {
        assert!(Value::Int(1).loose_eq(&Value::Float(1.0)));
        assert!(!Value::Int(1).strict_eq(&Value::Float(1.0)));
        assert!(Value::Null.strict_eq(&Value::Null));
        assert!(!Value::Null.loose_eq(&Value::Bool(false)));
        assert!(Value::string("a").strict_eq(&Value::from("a")));
    }
}
