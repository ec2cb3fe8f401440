//! create-codeforge - Scaffold a new project from the CodeForge template
//!
//! This is the main entry point for the create-codeforge command-line interface.

mod cli;
mod output;
mod prompt;
mod workflow;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use codeforge_core::host::{SystemResolver, SystemRunner};
use codeforge_core::probe;
use codeforge_core::template::TarballFetcher;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use prompt::TerminalPrompter;
use workflow::{Host, Outcome, Workflow};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Outcome> {
    let options = cli.run_options()?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let cwd = Utf8PathBuf::try_from(cwd).context("Current directory is not valid UTF-8")?;

    let prompter = TerminalPrompter;
    let fetcher = TarballFetcher::new()?;
    let host = Host {
        prompter: &prompter,
        fetcher: &fetcher,
        resolver: &SystemResolver,
        runner: &SystemRunner,
    };

    Workflow::new(&options, host, cwd, probe::detect_invocation_hint())
        .run()
        .await
}

/// Initialize tracing with appropriate verbosity
///
/// Logs stay quiet by default so the prompts and status lines own the
/// terminal. `RUST_LOG` takes precedence over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
