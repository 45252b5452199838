//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `parse` - Report parsing (JSON, summary and CSV output)
//! - `detect` - Format detection
//! - `categorize` - Category and location rule testing
//! - `config` - Effective configuration display

pub mod categorize;
pub mod config;
pub mod detect;
pub mod parse;

// Re-export command functions for main.rs
pub use categorize::*;
pub use config::*;
pub use detect::*;
pub use parse::*;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use locledger_core::LedgerConfig;

/// Load the ledger config, failing if an explicit path is missing
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    LedgerConfig::load(path).context("Failed to load ledger config")
}

/// Read extracted report text
pub fn read_report(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read file: {}", file.display()))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
