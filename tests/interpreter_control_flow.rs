mod common;
use common::run;

#[test]
fn while_loop_accumulates_a_sum() {
    let source = "\
        0 = sum;
        0 = i;
        {
            i sum + = sum;
            i++;
        } i 5 < while;
        (sum) println;
    ";
    assert_eq!(run(source).unwrap(), "10\n");
}

#[test]
fn if_without_else_runs_only_when_true() {
    assert_eq!(run("0 = x; { 1 = x; } true if; (x) println;").unwrap(), "1\n");
    assert_eq!(run("0 = x; { 1 = x; } false if; (x) println;").unwrap(), "0\n");
}

#[test]
fn if_else_takes_the_else_branch_when_condition_is_false() {
    let source = "false = flag; { 1 = x; } flag if { 2 = x; } else; (x) println;";
    assert_eq!(run(source).unwrap(), "2\n");
}

#[test]
fn if_else_takes_the_if_branch_when_condition_is_true() {
    let source = "true = flag; { 1 = x; } flag if { 2 = x; } else; (x) println;";
    assert_eq!(run(source).unwrap(), "1\n");
}

#[test]
fn break_stops_a_while_loop_early() {
    let source = "\
        0 = i;
        0 = stopped_at;
        {
            i stopped_at + = stopped_at;
            2 = threshold;
            { break; } stopped_at threshold >= if;
            i++;
        } i 10 < while;
        (stopped_at) println;
    ";
    assert_eq!(run(source).unwrap(), "3\n");
}

#[test]
fn continue_skips_the_rest_of_the_loop_body() {
    let source = "\
        0 = i;
        0 = sum;
        {
            i++;
            0 = is_even;
            i 2 % = remainder;
            remainder 0 == = is_even;
            { continue; } is_even if;
            i sum + = sum;
        } i 6 < while;
        (sum) println;
    ";
    assert_eq!(run(source).unwrap(), "9\n");
}
