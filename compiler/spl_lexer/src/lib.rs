//! Lexer for SPL using logos.
//!
//! Produces the token contract the AST builder consumes: identifiers, reserved
//! words and symbols as interned `Ident` tokens, numeric and string literals,
//! `EndOfStatement` for `;`, and a final `Eof`.

mod raw_token;

use logos::Logos;
use raw_token::RawToken;
use spl_diagnostic::{Diagnostic, ErrorCode};
use spl_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use thiserror::Error;
use tracing::debug;

/// What went wrong while lexing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unknown character `{0}`")]
    InvalidCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("integer literal `{0}` is out of range")]
    InvalidNumber(String),
    #[error("unknown escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// Lexing failure. Lexing stops at the first error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0001,
            LexErrorKind::UnterminatedString => ErrorCode::E0002,
            LexErrorKind::InvalidNumber(_) => ErrorCode::E0003,
            LexErrorKind::InvalidEscape(_) => ErrorCode::E0004,
            LexErrorKind::UnterminatedComment => ErrorCode::E0005,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            LexErrorKind::UnterminatedString => "string starts here",
            LexErrorKind::UnterminatedComment => "comment starts here",
            _ => "here",
        };
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, label)
    }
}

/// Lex source code into a [`TokenList`].
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        let raw = token_result.map_err(|()| LexError {
            kind: LexErrorKind::InvalidCharacter(slice.chars().next().unwrap_or('\0')),
            span,
        })?;

        let kind = match raw {
            RawToken::LineComment | RawToken::BlockComment(true) => continue,
            RawToken::BlockComment(false) => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedComment,
                    span: Span::new(span.start, span.start + 2),
                })
            }
            RawToken::UnterminatedString => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedString,
                    span,
                })
            }
            RawToken::Semicolon => TokenKind::EndOfStatement,
            RawToken::Int => slice.parse::<i64>().map(TokenKind::Int).map_err(|_| LexError {
                kind: LexErrorKind::InvalidNumber(slice.to_owned()),
                span,
            })?,
            RawToken::Float => TokenKind::float(slice.parse::<f64>().unwrap_or(f64::NAN)),
            RawToken::String => {
                let body = &slice[1..slice.len() - 1];
                let text = unescape(body, span.start + 1)?;
                TokenKind::Literal(interner.intern(&text))
            }
            RawToken::Ident | RawToken::Symbol => TokenKind::Ident(interner.intern(slice)),
        };
        result.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));

    debug!(tokens = result.len(), "lexed source");
    Ok(result)
}

/// Process escape sequences in a string literal body starting at byte
/// offset `base`.
fn unescape(body: &str, base: u32) -> Result<String, LexError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        // The regex guarantees a character follows every backslash.
        let Some((offset, escaped)) = chars.next() else {
            break;
        };
        out.push(match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            other => {
                let at = base + offset as u32 - 1;
                return Err(LexError {
                    kind: LexErrorKind::InvalidEscape(other),
                    span: Span::new(at, at + 1 + other.len_utf8() as u32),
                });
            }
        });
    }
    Ok(out)
}
