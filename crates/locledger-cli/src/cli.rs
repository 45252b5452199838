//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Locledger - Location cost extraction for General Ledger reports
#[derive(Parser)]
#[command(name = "locledger")]
#[command(about = "Extract location costs from General Ledger detail reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a report text file and print entries as JSON
    Parse {
        /// Extracted report text
        file: PathBuf,

        /// Ledger config file (defaults to the per-user override or built-ins)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Also write entries as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// List rows that were dropped and why (stderr)
        #[arg(long)]
        show_skipped: bool,

        /// Print an episode/location summary instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Check whether a text file is a General Ledger report
    Detect {
        /// Extracted report text
        file: PathBuf,
    },

    /// Show the category and location assigned to a description
    Categorize {
        /// Account code, e.g. 6342
        #[arg(long)]
        code: String,

        /// Row description text
        description: String,

        /// Ledger config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the effective ledger configuration
    Config {
        /// Print the override path instead of the config contents
        #[arg(long)]
        path: bool,

        /// Ledger config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
