//! Diagnostic system for SPL.
//!
//! Every phase converts its typed error into a [`Diagnostic`]:
//! - an error code for searchability (`splc explain E1003`)
//! - a message saying what went wrong
//! - a primary span saying where
//! - optional notes and help lines
//!
//! Rendering lives in [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
