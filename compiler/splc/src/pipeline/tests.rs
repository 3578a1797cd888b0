#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use spl_diagnostic::ErrorCode;

fn failure(source: &str) -> ErrorCode {
    let interner = StringInterner::new();
    run(source, &interner).unwrap_err().code
}

#[test]
fn runs_a_program() {
    let interner = StringInterner::new();
    let value = run("def f(a, b = 5) { a + b }; f(10)", &interner).unwrap();
    assert_eq!(value.to_string(), "15");
}

#[test]
fn every_phase_reports_its_own_code() {
    assert_eq!(failure("x = #"), ErrorCode::E0001);
    assert_eq!(failure("a b"), ErrorCode::E1003);
    assert_eq!(failure("for (x; xs) { }"), ErrorCode::E1010);
    assert_eq!(failure("break"), ErrorCode::E2001);
    assert_eq!(failure("1 / 0"), ErrorCode::E6006);
    assert_eq!(failure("def f(a) { a }; f()"), ErrorCode::E6003);
}

#[test]
fn diagnostics_carry_the_failing_span() {
    let interner = StringInterner::new();
    let diag = run("y = 1;\nz = y + w", &interner).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E6001);
    assert_eq!(diag.primary_span(), Some(spl_ir::Span::new(15, 16)));
}

#[test]
fn token_descriptions() {
    let interner = StringInterner::new();
    let tokens = tokens("x = 'hi'; 2.5", &interner).unwrap();
    let described: Vec<String> = tokens
        .iter()
        .map(|token| describe_token(token.kind, &interner))
        .collect();
    assert_eq!(described, ["x", "=", "\"hi\"", ";", "2.5", "<eof>"]);
}
