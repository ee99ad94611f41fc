//! Operations kernel: one pure, kind-dispatched function per operator.
//!
//! Every kernel takes already-resolved `(value, kind)` pairs — see
//! [`crate::eval::Evaluator::value_and_kind`] — and either returns a result
//! or raises a [`Diagnostic::TypeError`]/[`Diagnostic::DivisionByZero`].
//! None of these functions touch the scope stack or recurse into the AST;
//! that is the evaluator's job.

use crate::error::{ActualKinds, Diagnostic, Result};
use crate::position::SourceLocation;
use crate::scope::Symbol;
use crate::token::{supported_operand_types, Num, Token, TokenKind};

fn type_error(operator: TokenKind, operands: &[&Symbol], location: SourceLocation) -> Diagnostic {
    let expected = supported_operand_types(operator);
    let actual = if operands.len() == 1 {
        ActualKinds::Single(operands[0].kind().unwrap_or(TokenKind::Null))
    } else {
        let kinds: Vec<TokenKind> = operands.iter().filter_map(|s| s.kind()).collect();
        ActualKinds::Many(Box::leak(kinds.into_boxed_slice()))
    };
    Diagnostic::TypeError { operator, expected, actual, location }
}

fn numeric_binop(op1: Num, op2: Num, int_op: impl Fn(i64, i64) -> i64, float_op: impl Fn(f64, f64) -> f64) -> Num {
    match (op1, op2) {
        (Num::Int(a), Num::Int(b)) => Num::Int(int_op(a, b)),
        _ => Num::Float(float_op(op1.as_f64(), op2.as_f64())),
    }
}

pub fn add(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => Ok(Symbol::Number(numeric_binop(*a, *b, |x, y| x + y, |x, y| x + y))),
        (Symbol::Str(a), Symbol::Str(b)) => Ok(Symbol::Str(format!("{a}{b}"))),
        (Symbol::Array(a), Symbol::Array(b)) => {
            let mut out = a.clone();
            out.extend(b.iter().cloned());
            Ok(Symbol::Array(out))
        }
        _ => Err(type_error(TokenKind::Plus, &[op1, op2], location)),
    }
}

pub fn subtract(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => Ok(Symbol::Number(numeric_binop(*a, *b, |x, y| x - y, |x, y| x - y))),
        _ => Err(type_error(TokenKind::Minus, &[op1, op2], location)),
    }
}

pub fn multiply(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => Ok(Symbol::Number(numeric_binop(*a, *b, |x, y| x * y, |x, y| x * y))),
        _ => Err(type_error(TokenKind::Multiply, &[op1, op2], location)),
    }
}

pub fn divide(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => {
            if b.is_zero() {
                return Err(Diagnostic::DivisionByZero { location });
            }
            // Division always widens to a float result, matching the
            // source language's single `/` operator (true division).
            Ok(Symbol::Number(Num::Float(a.as_f64() / b.as_f64())))
        }
        _ => Err(type_error(TokenKind::Divide, &[op1, op2], location)),
    }
}

pub fn modulo(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => {
            if b.is_zero() {
                return Err(Diagnostic::DivisionByZero { location });
            }
            Ok(Symbol::Number(numeric_binop(*a, *b, |x, y| x % y, |x, y| x % y)))
        }
        _ => Err(type_error(TokenKind::Modulo, &[op1, op2], location)),
    }
}

pub fn increment(value: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match value {
        Symbol::Number(n) => Ok(Symbol::Number(numeric_binop(*n, Num::Int(1), |x, y| x + y, |x, y| x + y))),
        _ => Err(type_error(TokenKind::Increment, &[value], location)),
    }
}

pub fn decrement(value: &Symbol, location: SourceLocation) -> Result<Symbol> {
    match value {
        Symbol::Number(n) => Ok(Symbol::Number(numeric_binop(*n, Num::Int(1), |x, y| x - y, |x, y| x - y))),
        _ => Err(type_error(TokenKind::Decrement, &[value], location)),
    }
}

/// Structural equality: arrays recurse element-wise, mismatched kinds are
/// simply unequal rather than a type error (there is no supported-types
/// table to violate — `==`/`!=` accept every literal kind).
pub fn equal(op1: &Symbol, op2: &Symbol) -> bool {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => a.as_f64() == b.as_f64(),
        (Symbol::Str(a), Symbol::Str(b)) => a == b,
        (Symbol::Bool(a), Symbol::Bool(b)) => a == b,
        (Symbol::Null, Symbol::Null) => true,
        (Symbol::Array(a), Symbol::Array(b)) => {
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(x, y)| equal(&Symbol::from_literal(x), &Symbol::from_literal(y)))
        }
        _ => false,
    }
}

pub fn not_equal(op1: &Symbol, op2: &Symbol) -> bool {
    !equal(op1, op2)
}

pub fn greater_than(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => Ok(a.as_f64() > b.as_f64()),
        _ => Err(type_error(TokenKind::GreaterThan, &[op1, op2], location)),
    }
}

pub fn greater_than_or_equal(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    match (op1, op2) {
        (Symbol::Number(a), Symbol::Number(b)) => Ok(a.as_f64() >= b.as_f64()),
        _ => Err(type_error(TokenKind::GreaterThanOrEqual, &[op1, op2], location)),
    }
}

/// Defined as the negation of `>=`, per the source language — this is an
/// intentionally asymmetric definition (see design notes) and must not be
/// "corrected" into an independent numeric comparison.
pub fn less_than(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    greater_than_or_equal(op1, op2, location).map(|b| !b)
}

/// Defined as the negation of `>`, for the same reason as [`less_than`].
pub fn less_than_or_equal(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    greater_than(op1, op2, location).map(|b| !b)
}

pub fn and(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    match (op1, op2) {
        (Symbol::Bool(a), Symbol::Bool(b)) => Ok(*a && *b),
        _ => Err(type_error(TokenKind::And, &[op1, op2], location)),
    }
}

pub fn or(op1: &Symbol, op2: &Symbol, location: SourceLocation) -> Result<bool> {
    match (op1, op2) {
        (Symbol::Bool(a), Symbol::Bool(b)) => Ok(*a || *b),
        _ => Err(type_error(TokenKind::Or, &[op1, op2], location)),
    }
}

pub fn not(value: &Symbol, location: SourceLocation) -> Result<bool> {
    match value {
        Symbol::Bool(b) => Ok(!b),
        _ => Err(type_error(TokenKind::Not, &[value], location)),
    }
}

/// Array indexing. The user-facing index is 2-based (literal `2` denotes
/// element 0) — preserve this verbatim, it is a deliberate source quirk.
pub fn array_index(array: &[Token], index: &Symbol, location: SourceLocation) -> Result<Token> {
    let Symbol::Number(Num::Int(raw)) = index else {
        return Err(type_error(TokenKind::ArrayIndexing, &[index], location));
    };
    let zero_based = raw - 2;
    if zero_based < 0 || zero_based as usize >= array.len() {
        return Err(Diagnostic::InvalidArgument { name: "[]".to_string(), position: 1, location });
    }
    Ok(array[zero_based as usize].clone())
}
