mod common;
use common::run;

#[test]
fn declared_function_computes_from_its_parameters() {
    let source = "{ a b + } (a, b) add; ((3, 4) add) println;";
    assert_eq!(run(source).unwrap(), "7\n");
}

#[test]
fn function_body_runs_side_effects_before_its_return_expression() {
    // The body's first statement supplies the return value, but it is
    // evaluated last: every other statement runs first, in order, so a
    // later statement can still affect what the first one observes.
    let source = "\
        { a; 1 += a; } (a) increment_and_return;
        ((5) increment_and_return) println;
    ";
    assert_eq!(run(source).unwrap(), "6\n");
}

#[test]
fn wrong_argument_count_is_a_diagnostic() {
    let source = "{ a b + } (a, b) add; ((3) add) println;";
    let err = run(source).unwrap_err();
    assert!(matches!(err, wisp::Diagnostic::WrongArgumentCount { .. }));
}
