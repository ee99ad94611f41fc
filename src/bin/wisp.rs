use std::io::{stdin, stdout, BufReader, Write};
use std::process::exit;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, util::SubscriberInitExt, EnvFilter};

use wisp::Diagnostic;

/// Run a script file written in the interpreter's source language.
#[derive(Parser, Debug)]
#[clap(name = "wisp", version)]
struct Cli {
    /// Path to the script to execute.
    script: std::path::PathBuf,

    /// Emit pretty, multi-line diagnostic logging instead of the default
    /// compact form.
    #[clap(short, long)]
    verbose: bool,
}

fn setup_stderr_logging(verbose: bool) {
    let registry = tracing_subscriber::registry();
    let default_level = if verbose { tracing::Level::TRACE } else { tracing::Level::INFO };
    let env_filter = match std::env::var("RUST_LOG").ok() {
        Some(log) => EnvFilter::new(log),
        None => EnvFilter::default().add_directive(default_level.into()),
    };

    if verbose {
        registry
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_span_events(FmtSpan::NONE)
                    .event_format(tracing_subscriber::fmt::format().pretty().with_ansi(false))
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    } else {
        registry
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(
                        tracing_subscriber::fmt::format()
                            .compact()
                            .with_source_location(false)
                            .with_target(false)
                            .without_time()
                            .with_ansi(false),
                    )
                    .without_time()
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

/// Render a diagnostic as a banner plus up to two lines of source context
/// on each side of the offending line. The library only ever hands back
/// structured [`Diagnostic`] data — this formatting belongs to the CLI.
fn report(source: &str, path: &std::path::Path, error: &Diagnostic) {
    let location = error.location();
    eprintln!("error: {error}");
    eprintln!("  --> {}:{}", path.display(), location.line_number);

    let lines: Vec<&str> = source.lines().collect();
    let line_idx = location.line_number.saturating_sub(1) as usize;
    let start = line_idx.saturating_sub(2);
    let end = (line_idx + 2).min(lines.len().saturating_sub(1));

    for (i, line) in lines.iter().enumerate().take(end + 1).skip(start) {
        let marker = if i == line_idx { ">" } else { " " };
        eprintln!("{marker} {:>4} | {}", i + 1, line);
    }
}

fn read_script(path: &std::path::Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read script at {}", path.display()))
}

fn main() {
    let cli = Cli::parse();
    setup_stderr_logging(cli.verbose);

    let source = match read_script(&cli.script) {
        Ok(source) => source,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "could not start");
            exit(1);
        }
    };

    let mut stdin_lock = BufReader::new(stdin());
    let mut stdout_lock = stdout();

    match wisp::run_source(&source, &mut stdin_lock, &mut stdout_lock) {
        Ok(()) => {
            let _ = stdout_lock.flush();
            exit(0);
        }
        Err(error) => {
            let _ = stdout_lock.flush();
            report(&source, &cli.script, &error);
            exit(1);
        }
    }
}
