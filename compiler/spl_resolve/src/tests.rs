#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use spl_ir::ast::dump_program;

fn program(source: &str) -> Result<(Program, StringInterner), ResolveError> {
    let interner = StringInterner::new();
    let tokens = spl_lexer::lex(source, &interner).unwrap();
    let mut program = spl_parse::parse(&tokens, &interner).unwrap();
    resolve(&mut program, &interner)?;
    Ok((program, interner))
}

fn tree(source: &str) -> String {
    let (program, interner) = program(source).unwrap();
    dump_program(&program, &interner)
}

fn error(source: &str) -> ResolveErrorKind {
    program(source).unwrap_err().kind
}

fn first_def_frame(source: &str) -> ScopeShape {
    let (program, _) = program(source).unwrap();
    let first = program.statements()[0];
    match program.arena.get_expr(first).kind {
        ExprKind::Def { frame, .. } => frame,
        other => panic!("expected a definition, found {other:?}"),
    }
}

// Globals and slots

#[test]
fn sequential_slots_in_global_scope() {
    assert_eq!(
        tree("x = 1; y = x + 2"),
        "(= x@(0, 0) 1); (= y@(0, 1) (+ x@(0, 0) 2))"
    );
}

#[test]
fn reassignment_reuses_the_slot() {
    assert_eq!(tree("x = 1; x = 2"), "(= x@(0, 0) 1); (= x@(0, 0) 2)");
}

#[test]
fn program_scope_counts_vars_and_consts() {
    let (program, _) = program("const k = 1; var v = k; w = v").unwrap();
    assert_eq!(program.scope.kind, ScopeKind::Global);
    assert_eq!(program.scope.vars, 2);
    assert_eq!(program.scope.consts, 1);
}

#[test]
fn constants_use_their_own_slots() {
    assert_eq!(
        tree("const k = 1; var v = k"),
        "(const k@(0, const 0) 1); (var v@(0, 0) k@(0, const 0))"
    );
}

#[test]
fn undeclared_names_are_global() {
    assert_eq!(tree("print(y)"), "(call print@global y@global)");
    assert_eq!(tree("total += 1"), "(+= total@global 1)");
}

#[test]
fn value_is_resolved_before_the_target() {
    assert_eq!(tree("x = x"), "(= x@(0, 0) x@global)");
}

#[test]
fn declarations_are_visible_to_their_own_value() {
    assert_eq!(tree("var x = x"), "(var x@(0, 0) x@(0, 0))");
    assert_eq!(
        tree("var f = def (n) { f(n) }"),
        "(var f@(0, 0) (def anon#0 (n) {(call f@(1, 0) n@(0, 0))}))"
    );
    assert_eq!(
        tree("const k = def () { k }"),
        "(const k@(0, const 0) (def anon#0 () {k@(1, const 0)}))"
    );
}

// Nested scopes

#[test]
fn branches_get_their_own_scope() {
    assert_eq!(
        tree("x = 1; if (x) { y = x } else { y = 2 }"),
        "(= x@(0, 0) 1); (if x@(0, 0) {(= y@(0, 0) x@(1, 0))} {(= y@(0, 0) 2)})"
    );
}

#[test]
fn var_shadows_an_outer_binding() {
    assert_eq!(
        tree("x = 1; if (true) { var x = 2; x }; x"),
        "(= x@(0, 0) 1); (if true {(var x@(0, 0) 2); x@(0, 0)}); x@(0, 0)"
    );
}

#[test]
fn while_has_title_and_body_scopes() {
    assert_eq!(
        tree("n = 0; while (n < 3) { n = n + 1 }"),
        "(= n@(0, 0) 0); (while (< n@(1, 0) 3) {(= n@(2, 0) (+ n@(2, 0) 1))})"
    );
}

#[test]
fn for_header_lives_in_the_title_scope() {
    assert_eq!(
        tree("for (i = 0; i < 3; i += 1) { s = i }"),
        "(for (= i@(0, 0) 0) (< i@(0, 0) 3) (+= i@(0, 0) 1) {(= s@(0, 0) i@(1, 0))})"
    );
}

#[test]
fn bare_blocks_share_the_enclosing_scope() {
    assert_eq!(tree("{ a = 1 }; a"), "{(= a@(0, 0) 1)}; a@(0, 0)");
}

// Functions

#[test]
fn parameters_take_the_first_slots() {
    assert_eq!(
        tree("def add(a, b) { c = a + b }"),
        "(def add@(0, 0) (a b) {(= c@(0, 2) (+ a@(0, 0) b@(0, 1)))})"
    );
}

#[test]
fn functions_capture_enclosing_bindings() {
    assert_eq!(
        tree("x = 1; def f() { x }"),
        "(= x@(0, 0) 1); (def f@(0, 1) () {x@(1, 0)})"
    );
}

#[test]
fn recursive_reference_sees_own_name() {
    assert_eq!(
        tree("def f(n) { f(n) }"),
        "(def f@(0, 0) (n) {(call f@(1, 0) n@(0, 0))})"
    );
}

#[test]
fn later_top_level_functions_are_global() {
    assert_eq!(
        tree("def a() { b() }; def b() { 1 }"),
        "(def a@(0, 0) () {(call b@global)}); (def b@(0, 1) () {1})"
    );
}

#[test]
fn defaults_resolve_in_the_defining_scope() {
    assert_eq!(
        tree("d = 5; def f(a, b = d) { a + b }"),
        "(= d@(0, 0) 5); (def f@(0, 1) (a b=d@(0, 0)) {(+ a@(0, 0) b@(0, 1))})"
    );
}

#[test]
fn anonymous_functions_bind_no_name() {
    assert_eq!(
        tree("def mk() { return def (x) { x } }"),
        "(def mk@(0, 0) () {(return (def anon#0 (x) {x@(0, 0)}))})"
    );
}

#[test]
fn function_frame_counts_params_and_locals() {
    let frame = first_def_frame("def f(a) { b = a; const c = 1 }");
    assert_eq!(frame.kind, ScopeKind::Function);
    assert_eq!(frame.vars, 2);
    assert_eq!(frame.consts, 1);
}

#[test]
fn loop_shapes_are_recorded() {
    let (program, _) = program("for (i = 0; i < 2; i += 1) { a = i; b = a }").unwrap();
    let first = program.statements()[0];
    let ExprKind::For {
        title, body_scope, ..
    } = program.arena.get_expr(first).kind
    else {
        panic!("expected a for loop");
    };
    assert_eq!(title.kind, ScopeKind::LoopTitle);
    assert_eq!(title.vars, 1);
    assert_eq!(body_scope.kind, ScopeKind::Sub);
    assert_eq!(body_scope.vars, 2);
}

// Errors

#[test]
fn const_cannot_be_reassigned() {
    assert_eq!(
        error("const k = 1; k = 2"),
        ResolveErrorKind::AssignToConst("k".into())
    );
    assert_eq!(
        error("const k = 1; if (true) { k += 1 }"),
        ResolveErrorKind::AssignToConst("k".into())
    );
}

#[test]
fn break_and_continue_need_a_loop() {
    assert_eq!(error("break"), ResolveErrorKind::BreakOutsideLoop);
    assert_eq!(error("if (true) { continue }"), ResolveErrorKind::ContinueOutsideLoop);
}

#[test]
fn break_cannot_escape_a_function() {
    assert_eq!(
        error("while (true) { def f() { break } }"),
        ResolveErrorKind::BreakOutsideLoop
    );
}

#[test]
fn error_codes() {
    let err = program("break").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2001);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.primary_span(), Some(err.span));
}
