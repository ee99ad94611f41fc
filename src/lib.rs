//! A tree-walking interpreter for a small dynamically-typed scripting
//! language, built from a single-pass lexer, a priority-driven tree builder
//! that reuses tokens as AST nodes, and a recursive evaluator over a
//! non-lexical scope stack.
//!
//! ```
//! use wisp::run_source;
//! use std::io::{Cursor, sink};
//!
//! let mut stdout = sink();
//! run_source("3 2 +;", &mut Cursor::new(""), &mut stdout).unwrap();
//! ```

pub mod builder;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod ops;
pub mod position;
pub mod scope;
pub mod token;

use std::io::{BufRead, Write};

pub use error::{ActualKinds, Diagnostic, Result};
pub use position::SourceLocation;
pub use scope::ScopeStack;
pub use token::{Token, TokenKind};

/// Run a complete program: tokenize, build the statement tree, then
/// evaluate it against a fresh global scope.
pub fn run_source(source: &str, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<()> {
    let statements = parse_source(source)?;
    let mut scope = ScopeStack::new();
    eval::run(&statements, &mut scope, stdin, stdout)
}

/// Tokenize and tree-build `source` without evaluating it, e.g. for tooling
/// that wants to inspect the statement tree directly.
pub fn parse_source(source: &str) -> Result<Vec<Token>> {
    let tokens = lexer::tokenize(source)?;
    builder::build(tokens)
}
