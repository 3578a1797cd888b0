//! Lexer output consumed by the AST builder.

use crate::{Name, Span};

/// Token classification.
///
/// Identifiers, reserved words and operator/punctuation symbols all arrive as
/// `Ident`; the builder tells them apart by their interned text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident(Name),
    Int(i64),
    /// Float literal stored as bits so tokens stay `Eq + Hash`.
    Float(u64),
    /// String literal contents with escapes already processed.
    Literal(Name),
    /// `;`
    EndOfStatement,
    Eof,
}

impl TokenKind {
    #[inline]
    pub fn float(value: f64) -> Self {
        TokenKind::Float(value.to_bits())
    }

    /// Text name for identifier-like tokens.
    #[inline]
    pub fn ident(self) -> Option<Name> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Ordered token sequence. Always ends with a single `Eof` token.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
