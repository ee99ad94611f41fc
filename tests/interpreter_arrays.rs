mod common;
use common::run;

#[test]
fn array_literal_prints_bracketed_elements() {
    assert_eq!(run("([1, 2, 3]) println;").unwrap(), "[1, 2, 3]\n");
}

#[test]
fn indexing_is_two_based() {
    // Literal index `2` denotes the first element, `3` the second, and so
    // on — this interpreter subtracts 2 before indexing, matching the
    // source language's deliberately unusual convention.
    assert_eq!(run("([1, 2, 3] 2 []) println;").unwrap(), "1\n");
    assert_eq!(run("([1, 2, 3] 4 []) println;").unwrap(), "3\n");
}

#[test]
fn concatenation_joins_two_arrays() {
    assert_eq!(run("([1, 2] [3, 4] +) println;").unwrap(), "[1, 2, 3, 4]\n");
}

#[test]
fn out_of_bounds_index_is_a_diagnostic() {
    let err = run("([1, 2, 3] 10 []) println;").unwrap_err();
    assert!(matches!(err, wisp::Diagnostic::InvalidArgument { .. }));
}

#[test]
fn get_length_reports_element_count() {
    assert_eq!(run("(([1, 2, 3]) getLength) println;").unwrap(), "3\n");
}
