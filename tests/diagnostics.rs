mod common;
use common::run;
use wisp::Diagnostic;

#[test]
fn division_by_zero_is_a_diagnostic() {
    let err = run("(5 0 /) println;").unwrap_err();
    assert!(matches!(err, Diagnostic::DivisionByZero { .. }));
}

#[test]
fn referencing_an_undeclared_name_is_a_diagnostic() {
    let err = run("(missing) println;").unwrap_err();
    match err {
        Diagnostic::UndefinedIdentifier { name, .. } => assert_eq!(name, "missing"),
        other => panic!("expected UndefinedIdentifier, got {other:?}"),
    }
}

#[test]
fn out_of_bounds_array_index_is_invalid_argument_not_a_panic() {
    let err = run("([1, 2, 3] 10 []) println;").unwrap_err();
    assert!(matches!(err, Diagnostic::InvalidArgument { .. }));
}

#[test]
fn wrong_argument_count_to_a_builtin_is_a_diagnostic() {
    let err = run("(1, 2) println;").unwrap_err();
    assert!(matches!(err, Diagnostic::WrongArgumentCount { .. }));
}
