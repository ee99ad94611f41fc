//! Tree builder: turns the flat token list into a list of root statements
//! by repeatedly reducing the highest-priority token in the current
//! statement window.
//!
//! The builder mutates `Token`s in place rather than producing a distinct
//! node type — a `SQUARE_BRACKET` may become an `ARRAY` or
//! `ARRAY_INDEXING`, a `PARENTHESIS` may become `FUNCTION_CALL` or
//! `FUNCTION_DECLARATION` — and reassigns `children`/`value` as it goes.
//! This mirrors the source exactly, quirks included: see the module's
//! handling of `NOT`/`RETURN`/`BREAK`/`CONTINUE` below.

use smallvec::{smallvec, SmallVec};

use crate::error::{ActualKinds, Diagnostic, Result};
use crate::position::SourceLocation;
use crate::token::{expression_result_types, supported_operand_types, FuncCall, FuncDecl, Token, TokenKind, Value};

fn highest_priority_index(tokens: &[Token]) -> (usize, i32) {
    let mut best_idx = 0;
    let mut best_priority = tokens[0].priority;
    for (i, t) in tokens.iter().enumerate() {
        if t.kind == TokenKind::Semicolon {
            break;
        }
        if t.priority > best_priority {
            best_priority = t.priority;
            best_idx = i;
        }
    }
    (best_idx, best_priority)
}

/// Both operands precede the operator; if the first would land before the
/// start of the window, *both* are reported missing, even if the second
/// would otherwise be present. This is the source's own quirk (see
/// `extract_binary_operands` in the original), preserved verbatim.
fn extract_binary_operands(tokens: &mut Vec<Token>, index: usize) -> (Option<Token>, Option<Token>, usize) {
    if index >= 2 {
        let op1 = tokens.remove(index - 2);
        let op2 = tokens.remove(index - 2);
        (Some(op1), Some(op2), index - 2)
    } else {
        (None, None, index)
    }
}

fn extract_unary_left(tokens: &mut Vec<Token>, index: usize) -> (Option<Token>, usize) {
    if index >= 1 {
        (Some(tokens.remove(index - 1)), index - 1)
    } else {
        (None, index)
    }
}

fn extract_unary_right(tokens: &mut Vec<Token>, index: usize) -> Option<Token> {
    if index + 1 < tokens.len() {
        Some(tokens.remove(index + 1))
    } else {
        None
    }
}

fn check_operand_types(
    operator: TokenKind,
    location: SourceLocation,
    operands: &[Option<&Token>],
    supported: &'static [TokenKind],
) -> Result<()> {
    for operand in operands {
        let Some(operand) = operand else {
            return Err(Diagnostic::ExpectedOperand { operator, location });
        };
        if operand.kind == TokenKind::Identifier {
            continue;
        }
        if operand.kind.is_literal() {
            if !supported.contains(&operand.kind) {
                return Err(Diagnostic::TypeError {
                    operator,
                    expected: supported,
                    actual: ActualKinds::Single(operand.kind),
                    location,
                });
            }
        } else {
            let possible = expression_result_types(operand.kind);
            if !possible.iter().any(|k| supported.contains(k)) {
                return Err(Diagnostic::TypeError {
                    operator,
                    expected: supported,
                    actual: ActualKinds::Many(possible),
                    location,
                });
            }
        }
    }
    Ok(())
}

const CURLY: &[TokenKind] = &[TokenKind::CurlyBracket];
const BOOLEAN: &[TokenKind] = &[TokenKind::Boolean];
const IDENT: &[TokenKind] = &[TokenKind::Identifier];

/// Reduce a flat token list into its root statements. Recurses (only for
/// `{ ... }` bodies, which hold independent statements of their own).
pub fn build(mut tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut statements = Vec::new();

    while !tokens.is_empty() {
        let (index, priority) = highest_priority_index(&tokens);

        if priority == 0 {
            let mut removed: Vec<Token> = tokens.drain(0..=index).collect();
            let token = removed.pop().unwrap();
            if token.kind != TokenKind::Semicolon {
                statements.push(token);
            }
            continue;
        }

        tokens[index].priority = 0;
        let kind = tokens[index].kind;
        let location = tokens[index].location;

        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Modulo
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::GreaterThan
            | TokenKind::LessThan
            | TokenKind::GreaterThanOrEqual
            | TokenKind::LessThanOrEqual
            | TokenKind::And
            | TokenKind::Or => {
                let supported = supported_operand_types(kind);
                let (op1, op2, new_index) = extract_binary_operands(&mut tokens, index);
                check_operand_types(kind, location, &[op1.as_ref(), op2.as_ref()], supported)?;
                tokens[new_index].children = smallvec![op1.unwrap(), op2.unwrap()];
            }

            TokenKind::Increment | TokenKind::Decrement => {
                let (operand, new_index) = extract_unary_left(&mut tokens, index);
                check_operand_types(kind, location, &[operand.as_ref()], IDENT)?;
                tokens[new_index].children = smallvec![operand.unwrap()];
            }

            TokenKind::Assignment
            | TokenKind::AssignmentAdd
            | TokenKind::AssignmentSub
            | TokenKind::AssignmentMul
            | TokenKind::AssignmentDiv
            | TokenKind::AssignmentMod => {
                let identifier = extract_unary_right(&mut tokens, index);
                let (value, new_index) = extract_unary_left(&mut tokens, index);
                let value_supported = supported_operand_types(kind);
                check_operand_types(kind, location, &[value.as_ref()], value_supported)?;
                check_operand_types(kind, location, &[identifier.as_ref()], IDENT)?;
                tokens[new_index].children = smallvec![value.unwrap(), identifier.unwrap()];
            }

            TokenKind::Parenthesis => build_parenthesis(&mut tokens, index, location)?,
            TokenKind::SquareBracket => build_square_bracket(&mut tokens, index, location)?,
            TokenKind::CurlyBracket => build_curly_bracket(&mut tokens, index, location)?,

            TokenKind::If => {
                let mut else_token = None;
                if index + 1 < tokens.len() && tokens[index + 1].kind == TokenKind::Else {
                    else_token = Some(tokens.remove(index + 1));
                }
                let (body, condition, new_index) = extract_binary_operands(&mut tokens, index);
                check_operand_types(kind, location, &[body.as_ref()], CURLY)?;
                check_operand_types(kind, location, &[condition.as_ref()], BOOLEAN)?;
                let mut children: SmallVec<[Token; 2]> = smallvec![body.unwrap(), condition.unwrap()];
                if let Some(e) = else_token {
                    children.push(e);
                }
                tokens[new_index].children = children;
            }

            TokenKind::While => {
                let (body, condition, new_index) = extract_binary_operands(&mut tokens, index);
                check_operand_types(kind, location, &[body.as_ref()], CURLY)?;
                check_operand_types(kind, location, &[condition.as_ref()], BOOLEAN)?;
                tokens[new_index].children = smallvec![body.unwrap(), condition.unwrap()];
            }

            TokenKind::Else => {
                if index < 2 || tokens[index - 2].kind != TokenKind::If {
                    return Err(Diagnostic::ElseWithoutIf { location });
                }
                let (body, new_index) = extract_unary_left(&mut tokens, index);
                check_operand_types(kind, location, &[body.as_ref()], CURLY)?;
                tokens[new_index].children = smallvec![body.unwrap()];
            }

            // `NOT`, `RETURN`, `BREAK` and `CONTINUE` carry non-zero base
            // priority and are dispatched on by the evaluator, but the
            // source this language is drawn from never gave the tree
            // builder a reduction rule for them: they fall straight
            // through to becoming priority-0 leaves with no children on
            // the next pass. Preserved rather than "fixed" — see the
            // evaluator's handling of these kinds.
            _ => {}
        }
    }

    for (index, statement) in statements.iter().enumerate() {
        tracing::debug!(index, tree = ?statement, "statement tree");
    }

    Ok(statements)
}

fn build_parenthesis(tokens: &mut Vec<Token>, index: usize, location: SourceLocation) -> Result<()> {
    if matches!(tokens[index].value, Value::Bracket(')')) {
        return Err(Diagnostic::UnbalancedParentheses { location });
    }

    let mut depth = 1;
    let mut i = index + 1;
    loop {
        if i >= tokens.len() {
            return Err(Diagnostic::UnbalancedParentheses { location });
        }
        if tokens[i].kind == TokenKind::Parenthesis {
            match tokens[i].value {
                Value::Bracket(')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Value::Bracket('(') => depth += 1,
                _ => {}
            }
        }
        i += 1;
    }

    let mut removed: Vec<Token> = tokens.drain(index + 1..=i).collect();
    removed.pop();
    let mut children = Vec::with_capacity(removed.len());
    for tok in removed {
        match tok.kind {
            TokenKind::Semicolon => return Err(Diagnostic::UnbalancedParentheses { location: tok.location }),
            TokenKind::Comma | TokenKind::Parenthesis => {}
            _ => children.push(tok),
        }
    }
    tokens[index].children = children.into_iter().collect();

    if index + 1 >= tokens.len() || tokens[index + 1].kind != TokenKind::Identifier {
        return Ok(());
    }

    if index >= 1 && tokens[index - 1].kind == TokenKind::CurlyBracket {
        let name = Box::new(tokens.remove(index + 1));
        let body = Box::new(tokens.remove(index - 1));
        let paren_index = index - 1;
        let params: Vec<Token> = tokens[paren_index].children.drain(..).collect();
        tokens[paren_index].kind = TokenKind::FunctionDeclaration;
        tokens[paren_index].value = Value::FuncDecl(Box::new(FuncDecl { body, params, name }));
        return Ok(());
    }

    let name = Box::new(tokens.remove(index + 1));
    let args: Vec<Token> = tokens[index].children.drain(..).collect();
    tokens[index].kind = TokenKind::FunctionCall;
    tokens[index].value = Value::FuncCall(Box::new(FuncCall { args, name }));
    Ok(())
}

fn build_square_bracket(tokens: &mut Vec<Token>, index: usize, location: SourceLocation) -> Result<()> {
    if matches!(tokens[index].value, Value::Bracket(']')) {
        return Err(Diagnostic::UnbalancedSquareBrackets { location });
    }

    if index + 1 >= tokens.len() {
        return Err(Diagnostic::UnbalancedSquareBrackets { location });
    }

    let is_empty_pair = tokens[index + 1].kind == TokenKind::SquareBracket && matches!(tokens[index + 1].value, Value::Bracket(']'));

    if is_empty_pair && index >= 1 {
        let prev_token_index = index - 1;
        // Preserved quirk: the source requires `prev_token_index > 0`,
        // not `>= 0` — a bracket pair at token position 1 never reduces
        // to array indexing even with a valid preceding operand.
        if prev_token_index > 0 && matches!(tokens[prev_token_index].kind, TokenKind::Number | TokenKind::Identifier | TokenKind::Parenthesis) {
            let prev_prev_index = index - 2;
            if matches!(tokens[prev_prev_index].kind, TokenKind::Identifier | TokenKind::Array | TokenKind::Parenthesis) {
                tokens.remove(index + 1);
                let array_expr = tokens.remove(index - 2);
                let index_expr = tokens.remove(index - 2);
                let new_index = index - 2;
                tokens[new_index].kind = TokenKind::ArrayIndexing;
                tokens[new_index].children = smallvec![array_expr, index_expr];
                return Ok(());
            }
        }
    }

    let mut depth = 1;
    let mut i = index + 1;
    loop {
        if i >= tokens.len() {
            return Err(Diagnostic::UnbalancedSquareBrackets { location });
        }
        if tokens[i].kind == TokenKind::SquareBracket {
            match tokens[i].value {
                Value::Bracket(']') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Value::Bracket('[') => depth += 1,
                _ => {}
            }
        }
        i += 1;
    }

    let mut removed: Vec<Token> = tokens.drain(index + 1..=i).collect();
    removed.pop();
    let mut children = Vec::with_capacity(removed.len());
    for tok in removed {
        match tok.kind {
            TokenKind::Semicolon => return Err(Diagnostic::UnbalancedSquareBrackets { location: tok.location }),
            TokenKind::Comma | TokenKind::SquareBracket => {}
            _ => children.push(tok),
        }
    }
    tokens[index].kind = TokenKind::Array;
    tokens[index].children = children.into_iter().collect();
    Ok(())
}

fn build_curly_bracket(tokens: &mut Vec<Token>, index: usize, location: SourceLocation) -> Result<()> {
    if matches!(tokens[index].value, Value::Bracket('}')) {
        return Err(Diagnostic::UnbalancedCurlyBrackets { location });
    }

    let mut depth = 1;
    let mut i = index + 1;
    loop {
        if i >= tokens.len() {
            return Err(Diagnostic::UnbalancedCurlyBrackets { location });
        }
        if tokens[i].kind == TokenKind::CurlyBracket {
            match tokens[i].value {
                Value::Bracket('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Value::Bracket('{') => depth += 1,
                _ => {}
            }
        }
        i += 1;
    }

    let mut removed: Vec<Token> = tokens.drain(index + 1..=i).collect();
    removed.pop();
    let nested_statements = build(removed)?;
    tokens[index].children = nested_statements.into_iter().collect();
    Ok(())
}
