mod common;
use common::run;

#[test]
fn addition() {
    assert_eq!(run("(3 2 +) println;").unwrap(), "5\n");
}

#[test]
fn division_always_produces_a_float() {
    assert_eq!(run("(7 2 /) println;").unwrap(), "3.5\n");
    assert_eq!(run("(4 2 /) println;").unwrap(), "2\n");
}

#[test]
fn modulo_on_integers_stays_integer() {
    assert_eq!(run("(7 2 %) println;").unwrap(), "1\n");
}

#[test]
fn string_concatenation_uses_plus() {
    assert_eq!(run(r#"("foo" "bar" +) println;"#).unwrap(), "foobar\n");
}

#[test]
fn comparison_operators() {
    assert_eq!(run("(5 3 >) println;").unwrap(), "true\n");
    assert_eq!(run("(3 5 >) println;").unwrap(), "false\n");
    // `<` is defined as the negation of `>=` in this language, not as an
    // independent comparison — verify the asymmetric definition holds.
    assert_eq!(run("(3 5 <) println;").unwrap(), "true\n");
    assert_eq!(run("(5 5 <) println;").unwrap(), "false\n");
}

#[test]
fn boolean_operators_do_not_short_circuit_but_still_compute_correctly() {
    assert_eq!(run("(true false &&) println;").unwrap(), "false\n");
    assert_eq!(run("(true false ||) println;").unwrap(), "true\n");
}

#[test]
fn increment_returns_the_value_before_updating() {
    assert_eq!(run("0 = x; (x++) println; (x) println;").unwrap(), "0\n1\n");
}

#[test]
fn compound_assignment_reads_and_writes_the_same_name() {
    // Mirrored surface grammar: the right-hand value precedes the
    // compound operator, the target identifier follows it.
    assert_eq!(run("10 = x; 3 += x; (x) println;").unwrap(), "13\n");
}

#[test]
fn compound_assignment_expression_value_is_the_pre_update_value() {
    // Like `++`/`--`, a compound assignment reports the value `x` held
    // *before* the update, even though `x` itself ends up updated.
    assert_eq!(run("10 = x; (3 += x) println; (x) println;").unwrap(), "10\n13\n");
}
