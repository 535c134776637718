//! Command-line interface for godecl.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::analysis::{extract_file, ExtractOptions};
use crate::error::{ExtractError, EXIT_INTERNAL};
use crate::report::{self, Format};

/// Extract per-declaration metadata from a Go source file.
///
/// Prints one JSON document with the file's imports and, for every function
/// and method, its line span, signature, calls, doc comment and source.
#[derive(Parser, Debug)]
#[command(name = "godecl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Go source file to analyze
    pub file: PathBuf,

    /// Pretty-print the JSON record
    #[arg(long)]
    pub pretty: bool,

    /// Keep the qualifier on member calls (pkg.Foo instead of Foo)
    #[arg(long)]
    pub qualified_calls: bool,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Extraction options selected on the command line.
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            qualified_calls: self.qualified_calls,
        }
    }

    /// Output layout selected on the command line.
    pub fn format(&self) -> Format {
        if self.pretty {
            Format::Pretty
        } else {
            Format::Compact
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when it is set.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

/// Run one extraction and write the record to stdout.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let record = extract_file(&cli.file, &cli.options())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_json(&mut out, &record, cli.format()).context("failed to write output")?;
    Ok(())
}

/// Exit code for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExtractError>()
        .map(ExtractError::exit_code)
        .unwrap_or(EXIT_INTERNAL)
}

/// Print an error returned by [`run`] to stderr.
pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ExtractError>() {
        Some(e) => eprintln!("Error: {}", e),
        None => eprintln!("Error: {:#}", err),
    }
}
