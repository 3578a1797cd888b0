//! Error codes for all interpreter diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase. Used for `splc explain` lookups.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Builder (parse) errors
/// - E2xxx: Scope resolution errors
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Unterminated string literal
    E0002,
    /// Invalid number literal
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Unterminated block comment
    E0005,

    // Builder Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected `;` between statements
    E1003,
    /// Unclosed delimiter
    E1004,
    /// Mismatched closing delimiter
    E1005,
    /// Invalid assignment target
    E1006,
    /// Invalid `for` header
    E1007,
    /// Expected `(` or function body
    E1008,
    /// Unsupported reserved word
    E1009,
    /// For-each loops are not supported
    E1010,
    /// `else` without `if`
    E1011,
    /// Invalid parameter
    E1012,

    // Resolver Errors (E2xxx)
    /// `break` outside of a loop
    E2001,
    /// `continue` outside of a loop
    E2002,
    /// Assignment to a constant
    E2003,

    // Runtime Errors (E6xxx)
    /// Undefined variable
    E6001,
    /// Variable used before assignment
    E6002,
    /// Missing argument
    E6003,
    /// Value is not callable
    E6004,
    /// Operand type mismatch
    E6005,
    /// Division or modulo by zero
    E6006,
    /// Integer overflow
    E6007,
    /// Too many arguments
    E6008,

    // Internal Errors (E9xxx)
    /// Internal interpreter error
    E9001,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-paragraph explanation shown by `splc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "The source contains a character that starts no token.",
            ErrorCode::E0002 => "A string literal is missing its closing quote.",
            ErrorCode::E0003 => "A number literal does not fit in a 64-bit integer.",
            ErrorCode::E0004 => {
                "A string literal uses an unknown escape. Supported escapes are \
                 \\n \\t \\r \\0 \\\\ \\\" and \\'."
            }
            ErrorCode::E0005 => "A `/*` comment is never closed with `*/`.",
            ErrorCode::E1001 => "A token appears where the statement cannot continue.",
            ErrorCode::E1002 => "An operator or construct is missing an operand.",
            ErrorCode::E1003 => {
                "Two expressions follow each other without an operator between \
                 them. Separate statements with `;`."
            }
            ErrorCode::E1004 => "A `(` or `{` is never closed.",
            ErrorCode::E1005 => "A closing delimiter does not match the innermost open one.",
            ErrorCode::E1006 => "Only plain names can be assigned to.",
            ErrorCode::E1007 => "A `for` header must have three parts: `for (init; cond; step)`.",
            ErrorCode::E1008 => {
                "`if`, `while` and `for` need a parenthesised header, and a function \
                 definition needs a parameter list followed by a `{ ... }` body."
            }
            ErrorCode::E1009 => {
                "The word is reserved but the construct it introduces (classes, \
                 imports, exceptions) is not supported."
            }
            ErrorCode::E1010 => "Two-part `for (item; items)` loops are not supported.",
            ErrorCode::E1011 => "`else` must directly follow the body of an `if`.",
            ErrorCode::E1012 => "Parameters are written `name` or `name = default`.",
            ErrorCode::E2001 => "`break` can only appear inside a loop of the same function.",
            ErrorCode::E2002 => "`continue` can only appear inside a loop of the same function.",
            ErrorCode::E2003 => "A name declared with `const` cannot be assigned again.",
            ErrorCode::E6001 => "A free name was not defined globally when it was read.",
            ErrorCode::E6002 => "A local variable was read before any value was assigned to it.",
            ErrorCode::E6003 => "A parameter without a default value received no argument.",
            ErrorCode::E6004 => "Only functions can be called.",
            ErrorCode::E6005 => "An operator or condition received a value of the wrong type.",
            ErrorCode::E6006 => "Integer division or modulo by zero.",
            ErrorCode::E6007 => "Integer arithmetic overflowed 64 bits.",
            ErrorCode::E6008 => "A call passed more arguments than the function declares.",
            ErrorCode::E9001 => "The interpreter reached a state it considers impossible.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
