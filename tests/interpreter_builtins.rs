mod common;
use common::{run, run_with_input};

#[test]
fn print_omits_the_trailing_newline_println_adds() {
    assert_eq!(run(r#"("hi") print; ("!") println;"#).unwrap(), "hi!\n");
}

#[test]
fn to_number_parses_a_numeric_string() {
    assert_eq!(run(r#"(("42") toNumber) println;"#).unwrap(), "42\n");
}

#[test]
fn to_string_renders_a_number() {
    assert_eq!(run("((5) toString) println;").unwrap(), "5\n");
}

#[test]
fn to_boolean_is_inverted_for_numbers() {
    // The source convention: a number converts to boolean `true` only
    // when it is exactly zero.
    assert_eq!(run("((0) toBoolean) println;").unwrap(), "true\n");
    assert_eq!(run("((1) toBoolean) println;").unwrap(), "false\n");
}

#[test]
fn get_length_reports_string_character_count() {
    assert_eq!(run(r#"(("hello") getLength) println;"#).unwrap(), "5\n");
}

#[test]
fn get_input_reads_one_trimmed_line() {
    // Zero-argument calls need an explicit empty argument list: `()NAME`,
    // not a bare identifier wrapped in parentheses.
    let source = "()getInput = result; (result) println;";
    assert_eq!(run_with_input(source, "hello\n").unwrap(), "hello\n");
}

#[test]
fn wrong_argument_kind_is_a_diagnostic() {
    let err = run("(true) toNumber;").unwrap_err();
    assert!(matches!(err, wisp::Diagnostic::InvalidArgument { .. }));
}
