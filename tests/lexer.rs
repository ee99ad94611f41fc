use wisp::lexer::tokenize;
use wisp::{Diagnostic, TokenKind};

#[test]
fn numbers_and_arithmetic_operators() {
    let tokens = tokenize("12 + 7;").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::Semicolon]);
}

#[test]
fn two_character_operators_are_single_tokens() {
    let tokens = tokenize("a += b; a == b; a && b; a++;").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert!(kinds.contains(&TokenKind::AssignmentAdd));
    assert!(kinds.contains(&TokenKind::Equal));
    assert!(kinds.contains(&TokenKind::And));
    assert!(kinds.contains(&TokenKind::Increment));
}

#[test]
fn keywords_are_rewritten_from_identifiers() {
    let tokens = tokenize("if else while return break continue null true false").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Null,
            TokenKind::Boolean,
            TokenKind::Boolean,
        ]
    );
}

#[test]
fn string_literals_capture_their_contents() {
    let tokens = tokenize(r#""hello world";"#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
}

#[test]
fn backslash_backslash_starts_a_line_comment() {
    let tokens = tokenize("1;\\\\ this whole line is ignored\n2;").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Semicolon, TokenKind::Number, TokenKind::Semicolon]);
}

#[test]
fn lone_ampersand_is_rejected() {
    let err = tokenize("a &b;").unwrap_err();
    assert!(matches!(err, Diagnostic::UnexpectedCharacter { .. }));
}

#[test]
fn unknown_character_is_rejected() {
    let err = tokenize("a @ b;").unwrap_err();
    assert!(matches!(err, Diagnostic::UnexpectedCharacter { character: '@', .. }));
}

#[test]
fn unclosed_string_reaches_end_of_input() {
    // The lexer never sees a closing quote; the pending string token is
    // simply flushed as-is rather than erroring — there is no dedicated
    // "unterminated string" diagnostic class.
    let tokens = tokenize(r#""never closed"#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
}
