//! snipvault - Code Snippet Manager
//!
//! Entry point: sets up error reporting and logging, resolves settings and the
//! snippet file, then hands the parsed command to the CLI. With no command
//! the interactive menu starts.

use clap::Parser;
use colored::Colorize;
use snipvault::Settings;
use snipvault::cli::{self, Cli, Session};
use std::error::Error;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SNIPVAULT_LOG";

fn fail(err: impl std::fmt::Display, code: i32) -> ! {
    eprintln!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "Error:".bright_red().bold(),
        err
    );
    process::exit(code);
}

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load(path),
        None => Settings::load_default(),
    };
    let mut settings = loaded.unwrap_or_else(|err| fail(format!("{err:#}"), 1));
    if let Some(path) = cli.file {
        settings.data_file = Some(path);
    }
    tracing::debug!(data_file = %settings.data_file().display(), "starting");

    let mut session =
        Session::from_settings(&settings).unwrap_or_else(|err| fail(format!("{err:#}"), 1));

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = cli::execute_cli(cli.command, &mut session, &mut reader, &mut out) {
        out.flush()?;
        fail(format!("{err:#}"), 1);
    }

    Ok(())
}
