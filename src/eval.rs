//! Tree-walking evaluator.
//!
//! Two mutually recursive layers: [`exec_block`]/[`exec_statement`] run
//! statements for their control-flow effect ([`Flow`]), while [`eval_expr`]
//! reduces an expression node to a [`Symbol`]. Every statement is cloned
//! immediately before it runs — loop bodies and function bodies are
//! re-executed from a pristine copy on each pass rather than letting any
//! incidental node mutation leak between iterations.

use std::io::{BufRead, Write};

use smartstring::alias::String as SmartString;

use crate::error::{ActualKinds, Diagnostic, Result};
use crate::ops;
use crate::position::SourceLocation;
use crate::scope::{ScopeStack, Symbol};
use crate::token::{FuncCall, FuncDecl, Token, TokenKind, Value};

/// What a statement (or a block of them) did, as seen by its caller.
#[derive(Debug)]
enum Flow {
    Normal,
    Break,
    Continue,
    Return(Symbol),
}

/// Run every top-level statement a source file produces after tokenizing
/// and tree-building. `Break`/`Continue`/`Return` reaching the top level are
/// treated as no-ops — they only have meaning inside a loop or function.
pub fn run(statements: &[Token], scope: &mut ScopeStack, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<()> {
    exec_block(statements, scope, stdin, stdout)?;
    Ok(())
}

fn exec_block(statements: &[Token], scope: &mut ScopeStack, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<Flow> {
    for (index, statement) in statements.iter().enumerate() {
        let statement = statement.clone();
        let flow = exec_statement(&statement, scope, stdin, stdout)?;
        tracing::debug!(index, kind = ?statement.kind, flow = ?flow, "statement executed");
        if !matches!(flow, Flow::Normal) {
            return Ok(flow);
        }
    }
    Ok(Flow::Normal)
}

fn expect_bool(symbol: &Symbol, operator: TokenKind, location: SourceLocation) -> Result<bool> {
    match symbol {
        Symbol::Bool(b) => Ok(*b),
        other => Err(Diagnostic::TypeError {
            operator,
            expected: &[TokenKind::Boolean],
            actual: ActualKinds::Single(other.kind().unwrap_or(TokenKind::Null)),
            location,
        }),
    }
}

fn exec_statement(token: &Token, scope: &mut ScopeStack, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<Flow> {
    match token.kind {
        // Carried over verbatim from the tree builder's silent no-op for
        // these kinds: a bare `break`/`continue`/`return` never grew
        // children, so there is nothing to evaluate beyond the signal
        // itself.
        TokenKind::Break => Ok(Flow::Break),
        TokenKind::Continue => Ok(Flow::Continue),
        TokenKind::Return => {
            let value = match token.children.first() {
                Some(child) => eval_expr(child, scope, stdin, stdout)?,
                None => Symbol::Null,
            };
            Ok(Flow::Return(value))
        }

        TokenKind::If => {
            let condition = eval_expr(&token.children[1], scope, stdin, stdout)?;
            let taken = expect_bool(&condition, TokenKind::If, token.location)?;
            if taken {
                exec_block(&token.children[0].children, scope, stdin, stdout)
            } else if let Some(else_node) = token.children.get(2) {
                // The `else` branch is itself wrapped in an `Else` node
                // (its own reduction step tucks the curly body underneath
                // it) rather than appearing as the bare body directly.
                exec_block(&else_node.children[0].children, scope, stdin, stdout)
            } else {
                Ok(Flow::Normal)
            }
        }

        TokenKind::While => {
            loop {
                let condition = eval_expr(&token.children[1], scope, stdin, stdout)?;
                if !expect_bool(&condition, TokenKind::While, token.location)? {
                    break;
                }
                match exec_block(&token.children[0].children, scope, stdin, stdout)? {
                    Flow::Break => break,
                    Flow::Continue | Flow::Normal => {}
                    Flow::Return(value) => return Ok(Flow::Return(value)),
                }
            }
            Ok(Flow::Normal)
        }

        _ => {
            eval_expr(token, scope, stdin, stdout)?;
            Ok(Flow::Normal)
        }
    }
}

fn as_func_decl(token: &Token) -> &FuncDecl {
    match &token.value {
        Value::FuncDecl(decl) => decl,
        _ => unreachable!("FunctionDeclaration tokens always carry a FuncDecl value"),
    }
}

fn as_func_call(token: &Token) -> &FuncCall {
    match &token.value {
        Value::FuncCall(call) => call,
        _ => unreachable!("FunctionCall tokens always carry a FuncCall value"),
    }
}

fn call_user_function(
    name: &str,
    params: &[SmartString],
    body: &[Token],
    args: &[Symbol],
    location: SourceLocation,
    scope: &mut ScopeStack,
    stdin: &mut dyn BufRead,
    stdout: &mut dyn Write,
) -> Result<Symbol> {
    if params.len() != args.len() {
        return Err(Diagnostic::WrongArgumentCount {
            name: name.to_string(),
            expected: params.len(),
            actual: args.len(),
            location,
        });
    }
    if body.is_empty() {
        return Err(Diagnostic::MissingReturnStatement { name: name.to_string(), location });
    }

    scope.push();
    for (param, arg) in params.iter().zip(args.iter()) {
        scope.set(param, arg.clone());
    }

    // The body's first statement supplies the call's result; every other
    // statement runs purely for effect. A `return` anywhere among them
    // still short-circuits and overrides it.
    let outcome = exec_block(&body[1..], scope, stdin, stdout).and_then(|flow| match flow {
        Flow::Return(value) => Ok(value),
        _ => eval_expr(&body[0], scope, stdin, stdout),
    });

    scope.pop();
    outcome
}

/// Evaluate an expression node to its runtime value. Statement-only kinds
/// (`If`/`While`/`Break`/`Continue`/`Return`) never reach here in practice —
/// [`exec_statement`] intercepts them first.
fn eval_expr(token: &Token, scope: &mut ScopeStack, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<Symbol> {
    match token.kind {
        TokenKind::Number | TokenKind::String | TokenKind::Boolean | TokenKind::Null => Ok(Symbol::from_literal(token)),

        TokenKind::Identifier => Ok(scope.get(token)?.clone()),

        TokenKind::Array => {
            let mut elements = Vec::with_capacity(token.children.len());
            for child in &token.children {
                let value = eval_expr(child, scope, stdin, stdout)?;
                elements.push(value.to_token(child.location));
            }
            Ok(Symbol::Array(elements))
        }

        TokenKind::Plus | TokenKind::Minus | TokenKind::Multiply | TokenKind::Divide | TokenKind::Modulo => {
            let op1 = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let op2 = eval_expr(&token.children[1], scope, stdin, stdout)?;
            match token.kind {
                TokenKind::Plus => ops::add(&op1, &op2, token.location),
                TokenKind::Minus => ops::subtract(&op1, &op2, token.location),
                TokenKind::Multiply => ops::multiply(&op1, &op2, token.location),
                TokenKind::Divide => ops::divide(&op1, &op2, token.location),
                TokenKind::Modulo => ops::modulo(&op1, &op2, token.location),
                _ => unreachable!(),
            }
        }

        TokenKind::Equal | TokenKind::NotEqual => {
            let op1 = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let op2 = eval_expr(&token.children[1], scope, stdin, stdout)?;
            let result = if token.kind == TokenKind::Equal { ops::equal(&op1, &op2) } else { ops::not_equal(&op1, &op2) };
            Ok(Symbol::Bool(result))
        }

        TokenKind::GreaterThan | TokenKind::LessThan | TokenKind::GreaterThanOrEqual | TokenKind::LessThanOrEqual => {
            let op1 = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let op2 = eval_expr(&token.children[1], scope, stdin, stdout)?;
            let result = match token.kind {
                TokenKind::GreaterThan => ops::greater_than(&op1, &op2, token.location)?,
                TokenKind::GreaterThanOrEqual => ops::greater_than_or_equal(&op1, &op2, token.location)?,
                TokenKind::LessThan => ops::less_than(&op1, &op2, token.location)?,
                TokenKind::LessThanOrEqual => ops::less_than_or_equal(&op1, &op2, token.location)?,
                _ => unreachable!(),
            };
            Ok(Symbol::Bool(result))
        }

        // No short-circuit evaluation: both operands are always reduced,
        // matching the language this interpreter is built for.
        TokenKind::And | TokenKind::Or => {
            let op1 = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let op2 = eval_expr(&token.children[1], scope, stdin, stdout)?;
            let result = if token.kind == TokenKind::And { ops::and(&op1, &op2, token.location)? } else { ops::or(&op1, &op2, token.location)? };
            Ok(Symbol::Bool(result))
        }

        // Like `Break`/`Continue`/`Return`, `Not` carries a nonzero base
        // priority but the tree builder never gave it a reduction rule, so
        // it reaches here with no child to negate. Preserved rather than
        // "fixed": `!` is accepted lexically but never evaluable as an
        // operator.
        TokenKind::Not => match token.children.first() {
            Some(child) => {
                let operand = eval_expr(child, scope, stdin, stdout)?;
                Ok(Symbol::Bool(ops::not(&operand, token.location)?))
            }
            None => Err(Diagnostic::ExpectedOperand { operator: TokenKind::Not, location: token.location }),
        },

        TokenKind::Increment | TokenKind::Decrement => {
            let identifier = &token.children[0];
            let previous = scope.get(identifier)?.clone();
            let updated =
                if token.kind == TokenKind::Increment { ops::increment(&previous, token.location)? } else { ops::decrement(&previous, token.location)? };
            scope.set_value(identifier.identifier_name(), updated, token.location)?;
            Ok(previous)
        }

        TokenKind::Assignment => {
            let value = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let identifier = &token.children[1];
            scope.set(identifier.identifier_name(), value.clone());
            Ok(value)
        }

        TokenKind::AssignmentAdd
        | TokenKind::AssignmentSub
        | TokenKind::AssignmentMul
        | TokenKind::AssignmentDiv
        | TokenKind::AssignmentMod => {
            let rhs = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let identifier = &token.children[1];
            let previous = scope.get(identifier)?.clone();
            let updated = match token.kind {
                TokenKind::AssignmentAdd => ops::add(&previous, &rhs, token.location)?,
                TokenKind::AssignmentSub => ops::subtract(&previous, &rhs, token.location)?,
                TokenKind::AssignmentMul => ops::multiply(&previous, &rhs, token.location)?,
                TokenKind::AssignmentDiv => ops::divide(&previous, &rhs, token.location)?,
                TokenKind::AssignmentMod => ops::modulo(&previous, &rhs, token.location)?,
                _ => unreachable!(),
            };
            scope.set_value(identifier.identifier_name(), updated, token.location)?;
            Ok(previous)
        }

        TokenKind::Parenthesis => match token.children.len() {
            0 => Ok(Symbol::Null),
            1 => eval_expr(&token.children[0], scope, stdin, stdout),
            _ => Err(Diagnostic::UnsupportedToken { kind: token.kind, location: token.location }),
        },

        TokenKind::ArrayIndexing => {
            let array = eval_expr(&token.children[0], scope, stdin, stdout)?;
            let Symbol::Array(elements) = &array else {
                return Err(Diagnostic::TypeError {
                    operator: TokenKind::ArrayIndexing,
                    expected: &[TokenKind::Array],
                    actual: ActualKinds::Single(array.kind().unwrap_or(TokenKind::Null)),
                    location: token.location,
                });
            };
            let index = eval_expr(&token.children[1], scope, stdin, stdout)?;
            let element = ops::array_index(elements, &index, token.location)?;
            Ok(Symbol::from_literal(&element))
        }

        TokenKind::FunctionDeclaration => {
            let decl = as_func_decl(token);
            let params: Vec<SmartString> = decl.params.iter().map(|p| SmartString::from(p.identifier_name())).collect();
            let body: Vec<Token> = decl.body.children.to_vec();
            scope.set(decl.name.identifier_name(), Symbol::Function { params, body });
            Ok(Symbol::Null)
        }

        TokenKind::FunctionCall => {
            let call = as_func_call(token);
            let name = call.name.identifier_name();

            if let Some(builtin) = crate::builtins::lookup(name) {
                let mut arg_tokens = Vec::with_capacity(call.args.len());
                for arg in &call.args {
                    let value = eval_expr(arg, scope, stdin, stdout)?;
                    arg_tokens.push(value.to_token(arg.location));
                }
                crate::builtins::check_arity(builtin, &arg_tokens, token.location)?;
                let result = crate::builtins::call(name, &arg_tokens, token.location, stdin, stdout)?;
                return Ok(Symbol::from_literal(&result));
            }

            let mut args = Vec::with_capacity(call.args.len());
            for arg in &call.args {
                args.push(eval_expr(arg, scope, stdin, stdout)?);
            }

            let identifier_lookup = Token::leaf(TokenKind::Identifier, token.location, Value::Name(SmartString::from(name)));
            let (params, body) = match scope.get(&identifier_lookup)? {
                Symbol::Function { params, body } => (params.clone(), body.clone()),
                other => {
                    return Err(Diagnostic::TypeError {
                        operator: TokenKind::FunctionCall,
                        expected: &[],
                        actual: ActualKinds::Single(other.kind().unwrap_or(TokenKind::Null)),
                        location: token.location,
                    })
                }
            };
            call_user_function(name, &params, &body, &args, token.location, scope, stdin, stdout)
        }

        _ => Err(Diagnostic::UnsupportedToken { kind: token.kind, location: token.location }),
    }
}
