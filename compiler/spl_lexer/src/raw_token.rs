//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output before
//! string interning and final token conversion.

use logos::{Lexer, Logos};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    /// `true` when the closing `*/` was found.
    #[token("/*", block_comment)]
    BlockComment(bool),

    #[token(";")]
    Semicolon,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"\.[0-9]+")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    #[regex(r#"'([^'\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Punctuation
    #[token("{")]
    #[token("}")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token(".")]
    #[token(",")]
    #[token("=")]
    #[token("@")]
    #[token(":")]
    // Operators
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("==")]
    #[token("!=")]
    #[token("===")]
    #[token("!==")]
    #[token("&&")]
    #[token("||")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("!")]
    // Compound assignment
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("^=")]
    #[token("|=")]
    #[token("<<=")]
    #[token(">>=")]
    Symbol,
}

/// Consume a block comment body up to and including `*/`.
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}
