//! Lexer: one left-to-right pass over the source string.
//!
//! State is a single pending [`Token`] plus the running bracket-depth
//! counters that bias priority. Two-character operators are recognised by
//! tentatively emitting the one-character kind and promoting it if the
//! next character completes a known pair; anything that doesn't promote is
//! flushed as-is and the current character starts a fresh token, mirroring
//! the single dispatch loop the source interpreter uses.

use smartstring::alias::String as SmartString;

use crate::error::{Diagnostic, Result};
use crate::position::SourceLocation;
use crate::token::{Num, Token, TokenKind, Value, MAX_PRIORITY};

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn keyword_kind(word: &str) -> Option<TokenKind> {
    match word {
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "return" => Some(TokenKind::Return),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "null" => Some(TokenKind::Null),
        "true" | "false" => Some(TokenKind::Boolean),
        _ => None,
    }
}

fn finalize_pending(token: Token, tokens: &mut Vec<Token>) {
    if token.kind == TokenKind::Identifier {
        let word = token.identifier_name().to_string();
        if let Some(kind) = keyword_kind(&word) {
            let rewritten = match kind {
                TokenKind::Boolean => Token { kind, value: Value::Bool(word == "true"), ..token },
                TokenKind::Null => Token { kind, value: Value::Null, ..token },
                other => Token { kind: other, value: Value::Empty, ..token },
            };
            tokens.push(rewritten);
            return;
        }
    }
    tokens.push(token);
}

/// Try to fold `ch` into the pending token. Returns `Ok(true)` if `ch` was
/// consumed (either extending the pending token in place, or promoting it
/// to its two-character variant and pushing the result); `Ok(false)` means
/// the caller must flush the pending token and reprocess `ch` as the start
/// of something new.
fn try_extend(
    pending: &mut Option<Token>,
    ch: char,
    tokens: &mut Vec<Token>,
    base_priority: i32,
    location: SourceLocation,
) -> Result<bool> {
    let Some(tok) = pending.as_mut() else { return Ok(false) };

    macro_rules! promote {
        ($kind:expr) => {{
            *pending = Some(Token::new($kind, base_priority, location, Value::Empty));
            return Ok(true);
        }};
    }

    match tok.kind {
        TokenKind::Number => {
            if let Some(d) = ch.to_digit(10) {
                if let Value::Number(Num::Int(v)) = &mut tok.value {
                    *v = *v * 10 + d as i64;
                }
                return Ok(true);
            }
            Ok(false)
        }
        TokenKind::String => {
            if ch != '"' {
                if let Value::Str(s) = &mut tok.value {
                    s.push(ch);
                }
                return Ok(true);
            }
            tokens.push(pending.take().unwrap());
            Ok(true)
        }
        TokenKind::Identifier => {
            if is_identifier_continue(ch) {
                if let Value::Name(s) = &mut tok.value {
                    s.push(ch);
                }
                return Ok(true);
            }
            Ok(false)
        }
        TokenKind::Plus => match ch {
            '+' => promote!(TokenKind::Increment),
            '=' => promote!(TokenKind::AssignmentAdd),
            _ => Ok(false),
        },
        TokenKind::Minus => match ch {
            '-' => promote!(TokenKind::Decrement),
            '=' => promote!(TokenKind::AssignmentSub),
            _ => Ok(false),
        },
        TokenKind::Multiply if ch == '=' => promote!(TokenKind::AssignmentMul),
        TokenKind::Divide if ch == '=' => promote!(TokenKind::AssignmentDiv),
        TokenKind::Modulo if ch == '=' => promote!(TokenKind::AssignmentMod),
        TokenKind::Assignment if ch == '=' => promote!(TokenKind::Equal),
        TokenKind::Not if ch == '=' => promote!(TokenKind::NotEqual),
        TokenKind::GreaterThan if ch == '=' => promote!(TokenKind::GreaterThanOrEqual),
        TokenKind::LessThan if ch == '=' => promote!(TokenKind::LessThanOrEqual),
        TokenKind::And => {
            if ch == '&' {
                tokens.push(pending.take().unwrap());
                Ok(true)
            } else {
                Err(Diagnostic::UnexpectedCharacter { character: ch, location })
            }
        }
        TokenKind::Or => {
            if ch == '|' {
                tokens.push(pending.take().unwrap());
                Ok(true)
            } else {
                Err(Diagnostic::UnexpectedCharacter { character: ch, location })
            }
        }
        _ => Ok(false),
    }
}

#[allow(clippy::too_many_arguments)]
fn start_new(
    ch: char,
    byte_idx: usize,
    pending: &mut Option<Token>,
    tokens: &mut Vec<Token>,
    base_priority: &mut i32,
    parenthesis_depth: &mut i32,
    square_bracket_depth: &mut i32,
    location: &mut SourceLocation,
    maybe_comment: &mut bool,
    in_comment: &mut bool,
) -> Result<()> {
    if *maybe_comment && ch != '\\' {
        return Err(Diagnostic::UnexpectedCharacter { character: '\\', location: *location });
    }

    if ch.is_ascii_digit() {
        *pending = Some(Token::new(TokenKind::Number, *base_priority, *location, Value::Number(Num::Int(ch.to_digit(10).unwrap() as i64))));
        return Ok(());
    }
    if is_identifier_start(ch) {
        let mut name = SmartString::new();
        name.push(ch);
        *pending = Some(Token::new(TokenKind::Identifier, *base_priority, *location, Value::Name(name)));
        return Ok(());
    }

    match ch {
        '"' => *pending = Some(Token::new(TokenKind::String, *base_priority, *location, Value::Str(String::new()))),
        '+' => *pending = Some(Token::new(TokenKind::Plus, *base_priority, *location, Value::Empty)),
        '-' => *pending = Some(Token::new(TokenKind::Minus, *base_priority, *location, Value::Empty)),
        '*' => *pending = Some(Token::new(TokenKind::Multiply, *base_priority, *location, Value::Empty)),
        '/' => *pending = Some(Token::new(TokenKind::Divide, *base_priority, *location, Value::Empty)),
        '%' => *pending = Some(Token::new(TokenKind::Modulo, *base_priority, *location, Value::Empty)),
        '=' => *pending = Some(Token::new(TokenKind::Assignment, *base_priority, *location, Value::Empty)),
        '!' => *pending = Some(Token::new(TokenKind::Not, *base_priority, *location, Value::Empty)),
        '>' => *pending = Some(Token::new(TokenKind::GreaterThan, *base_priority, *location, Value::Empty)),
        '<' => *pending = Some(Token::new(TokenKind::LessThan, *base_priority, *location, Value::Empty)),
        '&' => *pending = Some(Token::new(TokenKind::And, *base_priority, *location, Value::Empty)),
        '|' => *pending = Some(Token::new(TokenKind::Or, *base_priority, *location, Value::Empty)),
        '(' => {
            *parenthesis_depth += 1;
            tokens.push(Token::new(TokenKind::Parenthesis, *base_priority, *location, Value::Bracket('(')));
            *base_priority += MAX_PRIORITY;
        }
        ')' => {
            *parenthesis_depth -= 1;
            *base_priority -= MAX_PRIORITY;
            tokens.push(Token::new(TokenKind::Parenthesis, *base_priority, *location, Value::Bracket(')')));
        }
        '{' => tokens.push(Token::new(TokenKind::CurlyBracket, *base_priority, *location, Value::Bracket('{'))),
        '}' => tokens.push(Token::new(TokenKind::CurlyBracket, *base_priority, *location, Value::Bracket('}'))),
        '[' => {
            *square_bracket_depth += 1;
            tokens.push(Token::new(TokenKind::SquareBracket, *base_priority, *location, Value::Bracket('[')));
            *base_priority += MAX_PRIORITY;
        }
        ']' => {
            *square_bracket_depth -= 1;
            *base_priority -= MAX_PRIORITY;
            tokens.push(Token::new(TokenKind::SquareBracket, *base_priority, *location, Value::Bracket(']')));
        }
        ',' => tokens.push(Token::new(TokenKind::Comma, *base_priority, *location, Value::Empty)),
        ';' => tokens.push(Token::new(TokenKind::Semicolon, *base_priority, *location, Value::Empty)),
        ' ' | '\t' | '\r' => {}
        '\n' => {
            location.line_number += 1;
            location.line_start = byte_idx + ch.len_utf8();
        }
        '\\' => {
            if *maybe_comment {
                *in_comment = true;
                *maybe_comment = false;
            } else {
                *maybe_comment = true;
            }
        }
        other => return Err(Diagnostic::UnexpectedCharacter { character: other, location: *location }),
    }
    Ok(())
}

/// Tokenize `source` into a flat, priority-annotated token sequence.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut base_priority = 0i32;
    let mut parenthesis_depth = 0i32;
    let mut square_bracket_depth = 0i32;
    let mut pending: Option<Token> = None;
    let mut tokens = Vec::new();
    let mut location = SourceLocation::START;
    let mut maybe_comment = false;
    let mut in_comment = false;

    for (byte_idx, ch) in source.char_indices() {
        if in_comment {
            if ch == '\n' {
                in_comment = false;
                location.line_number += 1;
                location.line_start = byte_idx + ch.len_utf8();
            }
            continue;
        }

        let extended = try_extend(&mut pending, ch, &mut tokens, base_priority, location)?;
        if !extended {
            if let Some(tok) = pending.take() {
                finalize_pending(tok, &mut tokens);
            }
            start_new(
                ch,
                byte_idx,
                &mut pending,
                &mut tokens,
                &mut base_priority,
                &mut parenthesis_depth,
                &mut square_bracket_depth,
                &mut location,
                &mut maybe_comment,
                &mut in_comment,
            )?;
        }
    }

    if let Some(tok) = pending.take() {
        finalize_pending(tok, &mut tokens);
    }
    if maybe_comment {
        return Err(Diagnostic::UnexpectedCharacter { character: '\\', location });
    }
    if parenthesis_depth != 0 {
        return Err(Diagnostic::UnbalancedParentheses { location });
    }
    if square_bracket_depth != 0 {
        return Err(Diagnostic::UnbalancedSquareBrackets { location });
    }

    for (index, token) in tokens.iter().enumerate() {
        tracing::trace!(index, kind = ?token.kind, line = token.location.line_number, "token");
    }

    Ok(tokens)
}
