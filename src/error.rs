//! Diagnostics: the non-recoverable error conditions the interpreter can
//! raise.
//!
//! Rendering a diagnostic into the human-readable banner-plus-source-context
//! the CLI prints is explicitly out of scope for this module (see the
//! `wisp` binary's `report` function) — [`Diagnostic`] only carries the
//! structured information a caller needs: which class of error occurred,
//! at which [`SourceLocation`], and with which operands.

use std::fmt;

use crate::position::SourceLocation;
use crate::token::TokenKind;

/// Every error class this interpreter can surface, matching the ten classes
/// of lexical, structural, semantic-parse and runtime failure the language
/// defines. All are fatal: the process that owns the interpreter is expected
/// to print a banner and exit with status 1.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A byte the lexer could not classify as the start of any token.
    UnexpectedCharacter { character: char, location: SourceLocation },
    /// A `(` was never closed, or a `)` had no matching opener.
    UnbalancedParentheses { location: SourceLocation },
    /// A `[` was never closed, or a `]` had no matching opener.
    UnbalancedSquareBrackets { location: SourceLocation },
    /// A `{` was never closed, or a `}` had no matching opener.
    UnbalancedCurlyBrackets { location: SourceLocation },
    /// An operand's kind was not among those an operator accepts.
    TypeError {
        operator: TokenKind,
        expected: &'static [TokenKind],
        actual: ActualKinds,
        location: SourceLocation,
    },
    /// An `else` token was not preceded by an `if`.
    ElseWithoutIf { location: SourceLocation },
    /// A binary or assignment operator was missing one of its operands.
    ExpectedOperand { operator: TokenKind, location: SourceLocation },
    /// A token kind reached a context that has no meaning for it.
    UnsupportedToken { kind: TokenKind, location: SourceLocation },
    /// A name was referenced with no symbol bound to it in the current scope.
    UndefinedIdentifier { name: String, location: SourceLocation },
    /// `/` or `%` with a zero right-hand operand.
    DivisionByZero { location: SourceLocation },
    /// A call supplied a different number of arguments than the callee
    /// (built-in or user-defined) declares.
    WrongArgumentCount { name: String, expected: usize, actual: usize, location: SourceLocation },
    /// A built-in rejected the concrete value of one of its arguments
    /// (e.g. `toNumber` on a non-numeric string).
    InvalidArgument { name: String, position: usize, location: SourceLocation },
    /// A function body had no statements to supply a return value from.
    MissingReturnStatement { name: String, location: SourceLocation },
}

/// The observed operand kind(s) reported by a [`Diagnostic::TypeError`]:
/// either a single literal kind, or the set of possible result kinds of a
/// non-literal sub-expression.
#[derive(Debug, Clone)]
pub enum ActualKinds {
    Single(TokenKind),
    Many(&'static [TokenKind]),
}

impl fmt::Display for ActualKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualKinds::Single(kind) => write!(f, "{kind:?}"),
            ActualKinds::Many(kinds) => {
                let names: Vec<String> = kinds.iter().map(|k| format!("{k:?}")).collect();
                write!(f, "{}", names.join(" or "))
            }
        }
    }
}

impl Diagnostic {
    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::UnexpectedCharacter { location, .. }
            | Diagnostic::UnbalancedParentheses { location }
            | Diagnostic::UnbalancedSquareBrackets { location }
            | Diagnostic::UnbalancedCurlyBrackets { location }
            | Diagnostic::TypeError { location, .. }
            | Diagnostic::ElseWithoutIf { location }
            | Diagnostic::ExpectedOperand { location, .. }
            | Diagnostic::UnsupportedToken { location, .. }
            | Diagnostic::UndefinedIdentifier { location, .. }
            | Diagnostic::DivisionByZero { location }
            | Diagnostic::WrongArgumentCount { location, .. }
            | Diagnostic::InvalidArgument { location, .. }
            | Diagnostic::MissingReturnStatement { location, .. } => *location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnexpectedCharacter { character, location } => {
                write!(f, "unexpected character \"{character}\" at line {}", location.line_number)
            }
            Diagnostic::UnbalancedParentheses { location } => {
                write!(f, "unbalanced parenthesis at line {}", location.line_number)
            }
            Diagnostic::UnbalancedSquareBrackets { location } => {
                write!(f, "unbalanced square brackets at line {}", location.line_number)
            }
            Diagnostic::UnbalancedCurlyBrackets { location } => {
                write!(f, "unbalanced curly brackets at line {}", location.line_number)
            }
            Diagnostic::TypeError { operator, expected, actual, location } => {
                let expected_names: Vec<String> = expected.iter().map(|k| format!("{k:?}")).collect();
                write!(
                    f,
                    "type error: operator {operator:?} at line {} supports {}, but got {actual}",
                    location.line_number,
                    expected_names.join(", ")
                )
            }
            Diagnostic::ElseWithoutIf { location } => {
                write!(f, "else without matching if at line {}", location.line_number)
            }
            Diagnostic::ExpectedOperand { operator, location } => {
                write!(f, "operator {operator:?} at line {} expected an operand", location.line_number)
            }
            Diagnostic::UnsupportedToken { kind, location } => {
                write!(f, "unsupported token {kind:?} at line {}", location.line_number)
            }
            Diagnostic::UndefinedIdentifier { name, location } => {
                write!(f, "undefined identifier \"{name}\" at line {}", location.line_number)
            }
            Diagnostic::DivisionByZero { location } => {
                write!(f, "division by zero at line {}", location.line_number)
            }
            Diagnostic::WrongArgumentCount { name, expected, actual, location } => {
                write!(
                    f,
                    "\"{name}\" at line {} expects {expected} argument(s), got {actual}",
                    location.line_number
                )
            }
            Diagnostic::InvalidArgument { name, position, location } => {
                write!(
                    f,
                    "invalid argument {position} to \"{name}\" at line {}",
                    location.line_number
                )
            }
            Diagnostic::MissingReturnStatement { name, location } => {
                write!(f, "function \"{name}\" at line {} has no return statement", location.line_number)
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

pub type Result<T> = std::result::Result<T, Diagnostic>;
