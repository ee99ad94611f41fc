//! Symbol table.
//!
//! A [`Scope`] is a plain name→symbol map; a [`ScopeStack`] is a LIFO stack
//! of scopes. Lookup and mutation only ever touch the **top** frame — there
//! is no lexical walk down the stack. That is an intentional, observable
//! property of the source language (a function body cannot see its
//! caller's bindings other than through its own parameters), not an
//! oversight: preserve it rather than "fixing" it into lexical scoping.

use smartstring::alias::String as SmartString;
use std::collections::HashMap;

use crate::error::{Diagnostic, Result};
use crate::position::SourceLocation;
use crate::token::{Num, Token, TokenKind, Value};

/// A bound value together with the literal kind it carries, or a callable
/// user-defined function.
#[derive(Debug, Clone)]
pub enum Symbol {
    Number(Num),
    Str(String),
    Bool(bool),
    Array(Vec<Token>),
    Null,
    Function { params: Vec<SmartString>, body: Vec<Token> },
}

impl Symbol {
    /// The literal `TokenKind` this symbol's value carries. Functions have
    /// no literal kind and must be matched on directly by callers.
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Symbol::Number(_) => Some(TokenKind::Number),
            Symbol::Str(_) => Some(TokenKind::String),
            Symbol::Bool(_) => Some(TokenKind::Boolean),
            Symbol::Array(_) => Some(TokenKind::Array),
            Symbol::Null => Some(TokenKind::Null),
            Symbol::Function { .. } => None,
        }
    }

    /// Build the symbol a plain assignment/declaration binds for a fully
    /// evaluated literal token (not an identifier — resolve those first).
    pub fn from_literal(token: &Token) -> Symbol {
        match &token.value {
            Value::Number(n) => Symbol::Number(*n),
            Value::Str(s) => Symbol::Str(s.clone()),
            Value::Bool(b) => Symbol::Bool(*b),
            Value::Null => Symbol::Null,
            _ if token.kind == TokenKind::Array => Symbol::Array(token.children.to_vec()),
            _ => Symbol::Null,
        }
    }

    /// Render this symbol's value back into a literal `Token`, e.g. for
    /// reporting the pre-update value of `++`/compound assignment.
    pub fn to_token(&self, location: SourceLocation) -> Token {
        match self {
            Symbol::Number(n) => Token::number(location, *n),
            Symbol::Str(s) => Token::string(location, s.clone()),
            Symbol::Bool(b) => Token::boolean(location, *b),
            Symbol::Null => Token::null(location),
            Symbol::Array(elems) => {
                let mut t = Token::leaf(TokenKind::Array, location, Value::Empty);
                t.children = elems.iter().cloned().collect();
                t
            }
            Symbol::Function { .. } => Token::null(location),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    symbols: HashMap<SmartString, Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`. If `value` is itself an identifier it is
    /// resolved against *this* scope first (matching the source's
    /// `Scope.set_symbol`, which never writes an unresolved reference).
    pub fn set(&mut self, name: &str, value: Symbol) {
        self.symbols.insert(SmartString::from(name), value);
    }

    pub fn get(&self, identifier: &Token) -> Result<&Symbol> {
        self.symbols.get(identifier.identifier_name()).ok_or_else(|| Diagnostic::UndefinedIdentifier {
            name: identifier.identifier_name().to_string(),
            location: identifier.location,
        })
    }

    pub fn get_mut(&mut self, name: &str, location: SourceLocation) -> Result<&mut Symbol> {
        self.symbols
            .get_mut(name)
            .ok_or_else(|| Diagnostic::UndefinedIdentifier { name: name.to_string(), location })
    }
}

/// LIFO stack of scopes. Every lookup/mutation call only inspects
/// `self.frames.last()` — see the module doc comment.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl ScopeStack {
    /// A fresh stack with one empty global scope pushed, matching the
    /// evaluator's initialisation.
    pub fn new() -> Self {
        let mut stack = ScopeStack { frames: Vec::new() };
        stack.push();
        stack
    }

    pub fn push(&mut self) {
        self.frames.push(Scope::new());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    fn top(&self) -> &Scope {
        self.frames.last().expect("scope stack is never emptied below the global scope")
    }

    fn top_mut(&mut self) -> &mut Scope {
        self.frames.last_mut().expect("scope stack is never emptied below the global scope")
    }

    pub fn get(&self, identifier: &Token) -> Result<&Symbol> {
        self.top().get(identifier)
    }

    pub fn set(&mut self, name: &str, value: Symbol) {
        self.top_mut().set(name, value)
    }

    pub fn set_value(&mut self, name: &str, value: Symbol, location: SourceLocation) -> Result<()> {
        *self.top_mut().get_mut(name, location)? = value;
        Ok(())
    }
}
