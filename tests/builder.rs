use wisp::parse_source;
use wisp::{Diagnostic, TokenKind};

#[test]
fn arithmetic_statement_reduces_to_a_single_binary_node() {
    let statements = parse_source("3 2 +;").unwrap();
    assert_eq!(statements.len(), 1);
    let root = &statements[0];
    assert_eq!(root.kind, TokenKind::Plus);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].kind, TokenKind::Number);
    assert_eq!(root.children[1].kind, TokenKind::Number);
}

#[test]
fn assignment_reads_value_then_target() {
    // Mirrored surface grammar: the value precedes `=`, the target name
    // follows it.
    let statements = parse_source("5 = x;").unwrap();
    assert_eq!(statements.len(), 1);
    let root = &statements[0];
    assert_eq!(root.kind, TokenKind::Assignment);
    assert_eq!(root.children[0].kind, TokenKind::Number);
    assert_eq!(root.children[1].kind, TokenKind::Identifier);
}

#[test]
fn parenthesized_call_becomes_a_function_call_node() {
    let statements = parse_source("(1, 2) add;").unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].kind, TokenKind::FunctionCall);
}

#[test]
fn curly_body_followed_by_params_and_name_is_a_declaration() {
    let statements = parse_source("{ a b + } (a, b) add;").unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].kind, TokenKind::FunctionDeclaration);
}

#[test]
fn square_brackets_with_contents_become_an_array_literal() {
    let statements = parse_source("[1, 2, 3];").unwrap();
    assert_eq!(statements[0].kind, TokenKind::Array);
    assert_eq!(statements[0].children.len(), 3);
}

#[test]
fn array_expression_followed_by_index_and_empty_brackets_is_indexing() {
    let statements = parse_source("[1, 2, 3] 4 [];").unwrap();
    assert_eq!(statements[0].kind, TokenKind::ArrayIndexing);
    assert_eq!(statements[0].children[0].kind, TokenKind::Array);
    assert_eq!(statements[0].children[1].kind, TokenKind::Number);
}

#[test]
fn unbalanced_parenthesis_is_a_diagnostic() {
    let err = parse_source("(1 2 +;").unwrap_err();
    assert!(matches!(err, Diagnostic::UnbalancedParentheses { .. }));
}

#[test]
fn unbalanced_square_bracket_is_a_diagnostic() {
    let err = parse_source("[1, 2;").unwrap_err();
    assert!(matches!(err, Diagnostic::UnbalancedSquareBrackets { .. }));
}

#[test]
fn unbalanced_curly_bracket_is_a_diagnostic() {
    let err = parse_source("{ 1; ").unwrap_err();
    assert!(matches!(err, Diagnostic::UnbalancedCurlyBrackets { .. }));
}

#[test]
fn else_without_a_preceding_if_is_a_diagnostic() {
    let err = parse_source("{ 1; } else;").unwrap_err();
    assert!(matches!(err, Diagnostic::ElseWithoutIf { .. }));
}

#[test]
fn adding_a_boolean_is_a_type_error_at_parse_time() {
    let err = parse_source("true 2 +;").unwrap_err();
    assert!(matches!(err, Diagnostic::TypeError { operator: TokenKind::Plus, .. }));
}
