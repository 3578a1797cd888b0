//! Phase pipeline: lex, build, resolve, evaluate.

use spl_diagnostic::Diagnostic;
use spl_eval::{Interpreter, Value};
use spl_ir::{Program, StringInterner, TokenKind, TokenList};
use tracing::debug;

pub fn tokens(source: &str, interner: &StringInterner) -> Result<TokenList, Diagnostic> {
    spl_lexer::lex(source, interner).map_err(|err| err.to_diagnostic())
}

/// Lex, build and resolve `source`.
pub fn compile(source: &str, interner: &StringInterner) -> Result<Program, Diagnostic> {
    let tokens = tokens(source, interner)?;
    let mut program = spl_parse::parse(&tokens, interner).map_err(|err| err.to_diagnostic())?;
    spl_resolve::resolve(&mut program, interner).map_err(|err| err.to_diagnostic())?;
    debug!(nodes = program.arena.expr_count(), "compiled");
    Ok(program)
}

/// Compile and evaluate `source`, returning the program's value.
pub fn run(source: &str, interner: &StringInterner) -> Result<Value, Diagnostic> {
    let program = compile(source, interner)?;
    Interpreter::new(&program, interner)
        .interpret()
        .map_err(|err| err.to_diagnostic())
}

/// One-line rendering of a token for `splc tokens`.
pub fn describe_token(kind: TokenKind, interner: &StringInterner) -> String {
    match kind {
        TokenKind::Ident(name) => interner.lookup(name).to_owned(),
        TokenKind::Int(n) => n.to_string(),
        TokenKind::Float(bits) => format!("{:?}", f64::from_bits(bits)),
        TokenKind::Literal(name) => format!("{:?}", interner.lookup(name)),
        TokenKind::EndOfStatement => ";".to_owned(),
        TokenKind::Eof => "<eof>".to_owned(),
    }
}

#[cfg(test)]
mod tests;
