//! Evaluator tests. Programs go through the full lex, parse and resolve
//! pipeline before they are interpreted.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod expression_tests;
mod function_tests;
mod operators_tests;
mod scope_tests;

use spl_ir::{Program, StringInterner};

use crate::{EvalError, EvalErrorKind, EvalResult, Interpreter, Value};

fn compile(source: &str, interner: &StringInterner) -> Program {
    let tokens = spl_lexer::lex(source, interner).unwrap();
    let mut program = spl_parse::parse(&tokens, interner).unwrap();
    spl_resolve::resolve(&mut program, interner).unwrap();
    program
}

pub(crate) fn run(source: &str) -> EvalResult {
    run_with(source, &[])
}

pub(crate) fn run_with(source: &str, globals: &[(&str, Value)]) -> EvalResult {
    let interner = StringInterner::new();
    let program = compile(source, &interner);
    let mut interpreter = Interpreter::new(&program, &interner);
    for (name, value) in globals {
        interpreter = interpreter.with_global(name, value.clone());
    }
    interpreter.interpret()
}

pub(crate) fn eval(source: &str) -> Value {
    run(source).unwrap()
}

pub(crate) fn eval_error(source: &str) -> EvalError {
    run(source).unwrap_err()
}

pub(crate) fn eval_err(source: &str) -> EvalErrorKind {
    eval_error(source).kind
}

/// Run the same resolved program twice through one interpreter.
pub(crate) fn run_twice(source: &str, globals: &[(&str, Value)]) -> (EvalResult, EvalResult) {
    let interner = StringInterner::new();
    let program = compile(source, &interner);
    let mut interpreter = Interpreter::new(&program, &interner);
    for (name, value) in globals {
        interpreter = interpreter.with_global(name, value.clone());
    }
    (interpreter.interpret(), interpreter.interpret())
}
