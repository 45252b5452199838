//! Locledger CLI - Location cost extraction for ledger reports
//!
//! Usage:
//!   locledger parse REPORT.txt              Print entries and groups as JSON
//!   locledger parse REPORT.txt --summary    Print an episode/location summary
//!   locledger detect REPORT.txt             Check for a General Ledger report
//!   locledger categorize --code 6342 TEXT   Test category and location rules
//!   locledger config                        Show the effective configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Parse {
            file,
            config,
            pretty,
            csv,
            show_skipped,
            summary,
        } => commands::cmd_parse(
            &file,
            config.as_deref(),
            commands::ParseOutput {
                pretty,
                csv,
                show_skipped,
                summary,
            },
        ),
        Commands::Detect { file } => commands::cmd_detect(&file),
        Commands::Categorize {
            code,
            description,
            config,
        } => commands::cmd_categorize(&code, &description, config.as_deref()),
        Commands::Config { path, config } => commands::cmd_config(path, config.as_deref()),
    }
}
