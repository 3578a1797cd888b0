//! Subcommand implementations for `splc`.
//!
//! Every command reads one source file, runs the pipeline as far as it
//! needs, and on failure renders the diagnostic to stderr and exits with
//! status 1.

mod explain;

pub use explain::explain_error;

use std::io::IsTerminal;

use spl_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use spl_diagnostic::Diagnostic;
use spl_ir::{ast::dump_program, StringInterner};

use crate::pipeline;

/// `splc run`: evaluate the file and print its value.
pub fn run_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    match pipeline::run(&source, &interner) {
        Ok(value) => println!("{value}"),
        Err(diag) => report(&diag, &source, path),
    }
}

/// `splc check`: lex, build and resolve without running.
pub fn check_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    match pipeline::compile(&source, &interner) {
        Ok(_) => println!("{path}: no errors"),
        Err(diag) => report(&diag, &source, path),
    }
}

/// `splc ast`: print the resolved tree.
pub fn ast_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    match pipeline::compile(&source, &interner) {
        Ok(program) => println!("{}", dump_program(&program, &interner)),
        Err(diag) => report(&diag, &source, path),
    }
}

/// `splc tokens`: print one token per line with its byte range.
pub fn tokens_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    match pipeline::tokens(&source, &interner) {
        Ok(tokens) => {
            for token in &tokens {
                println!(
                    "{:?}\t{}",
                    token.span,
                    pipeline::describe_token(token.kind, &interner)
                );
            }
        }
        Err(diag) => report(&diag, &source, path),
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                _ => format!("cannot read '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Render `diag` against `source` and exit with status 1.
fn report(diag: &Diagnostic, source: &str, path: &str) -> ! {
    let mode = if std::env::var_os("NO_COLOR").is_some() {
        ColorMode::Never
    } else {
        ColorMode::Auto
    };
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(mode, is_tty)
        .with_source(source)
        .with_file_path(path);
    emitter.emit(diag);
    emitter.flush();
    std::process::exit(1);
}
