//! Property tests for the precedence fold.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use proptest::prelude::*;
use spl_ir::ast::dump_program;
use spl_ir::StringInterner;

fn tree(source: &str) -> String {
    let interner = StringInterner::new();
    let tokens = spl_lexer::lex(source, &interner).unwrap();
    let program = spl_parse::parse(&tokens, &interner).unwrap();
    dump_program(&program, &interner)
}

fn additive_op() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-")]
}

fn any_arith_op() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("*")]
}

proptest! {
    /// A chain of equal-precedence operators nests to the left.
    #[test]
    fn additive_chains_are_left_associative(
        first in 0u32..1000,
        rest in prop::collection::vec((additive_op(), 0u32..1000), 1..12),
    ) {
        let mut source = first.to_string();
        let mut expected = first.to_string();
        for (op, n) in &rest {
            source = format!("{source} {op} {n}");
            expected = format!("({op} {expected} {n})");
        }
        prop_assert_eq!(tree(&source), expected);
    }

    /// Mixed `+`/`*` chains group products first, then fold sums left.
    #[test]
    fn products_bind_before_sums(
        first in 0u32..100,
        rest in prop::collection::vec((any_arith_op(), 0u32..100), 1..10),
    ) {
        let mut source = first.to_string();
        for (op, n) in &rest {
            source = format!("{source} {op} {n}");
        }

        // Split into `+`-separated terms, fold each term's products left.
        let mut terms: Vec<String> = vec![first.to_string()];
        for (op, n) in &rest {
            if *op == "*" {
                let last = terms.pop().unwrap();
                terms.push(format!("(* {last} {n})"));
            } else {
                terms.push(n.to_string());
            }
        }
        let mut iter = terms.into_iter();
        let mut expected = iter.next().unwrap();
        for term in iter {
            expected = format!("(+ {expected} {term})");
        }

        prop_assert_eq!(tree(&source), expected);
    }

    /// Wrapping any operand chain in parentheses never changes its shape.
    #[test]
    fn redundant_parentheses_are_transparent(
        first in 0u32..100,
        rest in prop::collection::vec((any_arith_op(), 0u32..100), 0..8),
    ) {
        let mut source = first.to_string();
        for (op, n) in &rest {
            source = format!("{source} {op} {n}");
        }
        prop_assert_eq!(tree(&format!("(({source}))")), tree(&source));
    }
}
