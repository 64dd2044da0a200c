//! Lesson-Harvest main entry point
//!
//! This is the command-line interface for the Lesson-Harvest exporter.

use anyhow::Context;
use clap::Parser;
use lesson_harvest::config::{load_config_or_default, Config, Credentials};
use lesson_harvest::crawler::crawl;
use lesson_harvest::output::{write_records, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lesson-Harvest: export your lesson history
///
/// Logs in with the GABA_ID and GABA_PASSWORD environment variables, walks
/// every lesson history page and prints the lessons in the chosen format.
#[derive(Parser, Debug)]
#[command(name = "lesson-harvest")]
#[command(version)]
#[command(about = "Export a learner's lesson history", long_about = None)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (overrides the settings file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Credentials are checked before any network call
    let credentials = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let format = cli.format.unwrap_or(config.output.format);
    handle_harvest(&config, &credentials, format, cli.output).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lesson_harvest=info,warn"),
            1 => EnvFilter::new("lesson_harvest=debug,info"),
            2 => EnvFilter::new("lesson_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl and writes the records out
async fn handle_harvest(
    config: &Config,
    credentials: &Credentials,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    tracing::info!("Starting harvest from {}", config.portal.base_url);

    let records = match crawl(config, credentials).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    write_records(format, &records, &mut out).context("Failed to write records")?;

    if let Some(path) = &output {
        tracing::info!("Wrote {} records to {}", records.len(), path.display());
    }

    Ok(())
}
