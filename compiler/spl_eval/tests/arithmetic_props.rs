//! Property tests: integer expressions evaluate like Rust arithmetic.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use proptest::prelude::*;
use spl_eval::{Interpreter, Value};
use spl_ir::StringInterner;

fn eval(source: &str) -> Value {
    let interner = StringInterner::new();
    let tokens = spl_lexer::lex(source, &interner).unwrap();
    let mut program = spl_parse::parse(&tokens, &interner).unwrap();
    spl_resolve::resolve(&mut program, &interner).unwrap();
    Interpreter::new(&program, &interner).interpret().unwrap()
}

/// Reference evaluation of `first (op n)*` with `*` above `+`/`-`.
fn expected(first: i64, rest: &[(char, i64)]) -> i64 {
    let mut sum = 0;
    let mut sign = 1;
    let mut term = first;
    for &(op, n) in rest {
        match op {
            '*' => term *= n,
            _ => {
                sum += sign * term;
                sign = if op == '+' { 1 } else { -1 };
                term = n;
            }
        }
    }
    sum + sign * term
}

fn op() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*')]
}

proptest! {
    #[test]
    fn mixed_chains_follow_precedence(
        first in 0i64..100,
        rest in prop::collection::vec((op(), 0i64..100), 0..6),
    ) {
        let mut source = first.to_string();
        for (op, n) in &rest {
            source.push_str(&format!(" {op} {n}"));
        }
        prop_assert_eq!(eval(&source), Value::Int(expected(first, &rest)));
    }

    #[test]
    fn division_and_remainder_truncate(a in -1000i64..1000, b in 1i64..50) {
        let source = format!("a = {a}; b = {b}; a / b * b + a % b");
        prop_assert_eq!(eval(&source), Value::Int(a));
        prop_assert_eq!(eval(&format!("a = {a}; a / {b}")), Value::Int(a / b));
    }

    #[test]
    fn variables_hold_what_was_assigned(values in prop::collection::vec(-500i64..500, 1..8)) {
        let mut source = String::from("total = 0;");
        for v in &values {
            source.push_str(&format!(" total += {v};"));
        }
        source.push_str(" total");
        prop_assert_eq!(eval(&source), Value::Int(values.iter().sum()));
    }
}
