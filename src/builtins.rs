//! The fixed built-in function registry.
//!
//! Each entry is `(name, handler, argument_kind_constraints)`. Arity and
//! per-position kind constraints are checked uniformly before the handler
//! runs; handlers themselves only worry about their own conversion logic.

use std::io::{BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Diagnostic, Result};
use crate::position::SourceLocation;
use crate::scope::Symbol;
use crate::token::{Num, Token, TokenKind, Value};

const L: &[TokenKind] = &[TokenKind::Number, TokenKind::String, TokenKind::Boolean, TokenKind::Array, TokenKind::Null];
const NUM_STR: &[TokenKind] = &[TokenKind::Number, TokenKind::String];
const NUM: &[TokenKind] = &[TokenKind::Number];
const STR_ARR: &[TokenKind] = &[TokenKind::String, TokenKind::Array];
const NUM_BOOL: &[TokenKind] = &[TokenKind::Number, TokenKind::Boolean];

/// Per-position accepted kinds for a registered built-in. `&[]` positions
/// never occur since arity is checked before indexing into this.
pub struct Builtin {
    pub name: &'static str,
    pub argument_kinds: &'static [&'static [TokenKind]],
}

pub const REGISTRY: &[Builtin] = &[
    Builtin { name: "print", argument_kinds: &[L] },
    Builtin { name: "println", argument_kinds: &[L] },
    Builtin { name: "toNumber", argument_kinds: &[NUM_STR] },
    Builtin { name: "toString", argument_kinds: &[L] },
    Builtin { name: "toBoolean", argument_kinds: &[NUM_BOOL] },
    Builtin { name: "getInput", argument_kinds: &[] },
    Builtin { name: "getRandom", argument_kinds: &[] },
    Builtin { name: "exit", argument_kinds: &[NUM] },
    Builtin { name: "getLength", argument_kinds: &[STR_ARR] },
    Builtin { name: "sleep", argument_kinds: &[NUM] },
    Builtin { name: "getTime", argument_kinds: &[] },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    REGISTRY.iter().find(|b| b.name == name)
}

pub fn check_arity(builtin: &Builtin, args: &[Token], location: SourceLocation) -> Result<()> {
    if args.len() != builtin.argument_kinds.len() {
        return Err(Diagnostic::WrongArgumentCount {
            name: builtin.name.to_string(),
            expected: builtin.argument_kinds.len(),
            actual: args.len(),
            location,
        });
    }
    for (position, (arg, kinds)) in args.iter().zip(builtin.argument_kinds.iter()).enumerate() {
        if !kinds.contains(&arg.kind) {
            return Err(Diagnostic::InvalidArgument { name: builtin.name.to_string(), position, location });
        }
    }
    Ok(())
}

fn print_value(token: &Token, out: &mut impl Write) {
    match token.kind {
        TokenKind::Array => {
            let _ = write!(out, "[");
            for (i, elem) in token.children.iter().enumerate() {
                print_value(elem, out);
                if i + 1 != token.children.len() {
                    let _ = write!(out, ", ");
                }
            }
            let _ = write!(out, "]");
        }
        TokenKind::Null => {
            let _ = write!(out, "null");
        }
        _ => {
            let _ = write!(out, "{}", stringify_value(token));
        }
    }
}

fn stringify_value(token: &Token) -> String {
    match &token.value {
        Value::Number(n) => n.to_string(),
        Value::Str(s) => s.clone(),
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Null => "null".to_string(),
        _ if token.kind == TokenKind::Array => {
            let parts: Vec<String> = token.children.iter().map(stringify_value).collect();
            format!("[{}]", parts.join(", "))
        }
        _ => String::new(),
    }
}

/// Dispatches `name` with already-evaluated-to-literal `args`, returning
/// the literal result token. `caller_location` is attributed to the
/// returned token, matching the source convention that a call's result
/// carries the call site's location.
pub fn call(
    name: &str,
    args: &[Token],
    caller_location: SourceLocation,
    stdin: &mut impl BufRead,
    stdout: &mut impl Write,
) -> Result<Token> {
    match name {
        "print" => {
            print_value(&args[0], stdout);
            Ok(Token::null(caller_location))
        }
        "println" => {
            print_value(&args[0], stdout);
            let _ = writeln!(stdout);
            Ok(Token::null(caller_location))
        }
        "toNumber" => {
            let text = stringify_value(&args[0]);
            let parsed: f64 = if let Value::Number(n) = &args[0].value { n.as_f64() } else { text.parse().map_err(|_| {
                Diagnostic::InvalidArgument { name: "toNumber".to_string(), position: 0, location: caller_location }
            })? };
            Ok(Token::number(caller_location, Num::Float(parsed)))
        }
        "toString" => Ok(Token::string(caller_location, stringify_value(&args[0]))),
        "toBoolean" => {
            let result = match &args[0].value {
                Value::Bool(b) => *b,
                // NUMBER case: preserves the source's inverted convention
                // where 0 is "true". See design notes.
                Value::Number(n) => n.as_f64() == 0.0,
                _ => false,
            };
            Ok(Token::boolean(caller_location, result))
        }
        "getInput" => {
            let mut line = String::new();
            stdin.read_line(&mut line).ok();
            let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
            Ok(Token::string(caller_location, trimmed))
        }
        "getRandom" => {
            // A small xorshift draw seeded from the system clock: no
            // external RNG crate is warranted for a single uniform draw.
            let seed = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(0x9E3779B9);
            let mut x = seed ^ 0x2545F4914F6CDD1D;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            let unit = (x >> 11) as f64 / (1u64 << 53) as f64;
            Ok(Token::number(caller_location, Num::Float(unit)))
        }
        "exit" => {
            let code = match &args[0].value {
                Value::Number(n) => n.as_f64() as i32,
                _ => 0,
            };
            std::process::exit(code);
        }
        "getLength" => {
            let len = match (&args[0].value, args[0].kind) {
                (Value::Str(s), _) => s.chars().count(),
                (_, TokenKind::Array) => args[0].children.len(),
                _ => 0,
            };
            Ok(Token::number(caller_location, Num::Int(len as i64)))
        }
        "sleep" => {
            if let Value::Number(n) = &args[0].value {
                std::thread::sleep(std::time::Duration::from_secs_f64(n.as_f64().max(0.0)));
            }
            Ok(Token::null(caller_location))
        }
        "getTime" => {
            let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or(0.0);
            Ok(Token::number(caller_location, Num::Float(now)))
        }
        _ => unreachable!("call() is only invoked after lookup() confirms the name is registered"),
    }
}
