//! Tree-walking evaluator for resolved SPL programs.
//!
//! The evaluator trusts the addresses the resolver wrote into the tree: every
//! local read or write walks exactly `distance` environment links and indexes
//! a slot array. Free names go through the run's global map.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values, functions included
//! - [`Environment`]: slot arrays linked to their lexical parent
//! - [`Interpreter`]: dispatch over node kinds, calls and loops
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//!
//! `break`, `continue` and `return` travel back up the evaluation stack as
//! [`Flow`] results rather than errors.

mod environment;
mod errors;
mod interpreter;
mod operators;
mod unary_operators;
mod value;

pub use environment::{Environment, LookupError};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Flow, Interpreter};
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Value};

#[cfg(test)]
mod tests;
