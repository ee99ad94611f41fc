use std::io::Cursor;

use wisp::Result;

/// Run a complete program and capture everything it wrote to stdout.
pub fn run(source: &str) -> Result<String> {
    let mut stdin = Cursor::new(Vec::new());
    let mut stdout = Vec::new();
    wisp::run_source(source, &mut stdin, &mut stdout)?;
    Ok(String::from_utf8(stdout).expect("program output is valid utf-8"))
}

/// Run a complete program with canned stdin input, capturing stdout.
pub fn run_with_input(source: &str, input: &str) -> Result<String> {
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut stdout = Vec::new();
    wisp::run_source(source, &mut stdin, &mut stdout)?;
    Ok(String::from_utf8(stdout).expect("program output is valid utf-8"))
}
