//! Report parsing command

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use locledger_core::{entries_to_csv, Error, LedgerParse, LedgerParser};
use tracing::info;

use super::{load_config, read_report, truncate};

/// Output options for `locledger parse`
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub pretty: bool,
    pub csv: Option<PathBuf>,
    pub show_skipped: bool,
    pub summary: bool,
}

pub fn cmd_parse(file: &Path, config: Option<&Path>, output: ParseOutput) -> Result<()> {
    let parse = parse_report(file, config)?;

    if output.show_skipped {
        eprint!("{}", format_skipped(&parse));
    }

    if let Some(ref csv_path) = output.csv {
        let csv = entries_to_csv(&parse.entries)?;
        fs::write(csv_path, csv)
            .with_context(|| format!("Failed to write CSV file: {}", csv_path.display()))?;
        info!(path = %csv_path.display(), entries = parse.entries_found, "Wrote CSV export");
    }

    if output.summary {
        print!("{}", format_summary(&parse));
    } else {
        println!("{}", render_json(&parse, output.pretty)?);
    }

    Ok(())
}

/// Read and parse a report file
pub fn parse_report(file: &Path, config: Option<&Path>) -> Result<LedgerParse> {
    let config = load_config(config)?;
    let text = read_report(file)?;
    let parser = LedgerParser::new(&config).context("Failed to build parser")?;

    parser.parse(&text).map_err(|e| match e {
        Error::UnrecognizedFormat => anyhow::anyhow!(
            "{} is not a General Ledger report (no \"General Ledger\", \"GL 505\" or \"Acct: NNNN\" markers found)",
            file.display()
        ),
        other => anyhow::Error::new(other).context("Failed to parse report"),
    })
}

pub fn render_json(parse: &LedgerParse, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(parse)?
    } else {
        serde_json::to_string(parse)?
    };
    Ok(json)
}

/// Human-readable episode/location breakdown
pub fn format_summary(parse: &LedgerParse) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("📋 Location Costs\n");
    out.push_str(&format!(
        "   Entries: {}   Total: ${:.2}\n",
        parse.entries_found, parse.total_amount
    ));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if parse.grouped.is_empty() {
        out.push_str("   No cost entries found.\n");
        return out;
    }

    out.push_str(&format!(
        "   {:7} │ {:24} │ {:10} │ {:>12}\n",
        "Episode", "Location", "Category", "Amount"
    ));
    out.push_str("   ────────┼──────────────────────────┼────────────┼─────────────\n");

    for group in &parse.grouped {
        for (category, amount) in &group.by_category {
            out.push_str(&format!(
                "   {:7} │ {:24} │ {:10} │ {:>12.2}\n",
                group.episode,
                truncate(&group.location, 24),
                category.as_str(),
                amount
            ));
        }
        out.push_str(&format!(
            "   {:7} │ {:24} │ {:10} │ {:>12.2}\n",
            "", "", "Subtotal", group.total
        ));
    }

    out
}

/// Dropped-row diagnostics, one line per row
pub fn format_skipped(parse: &LedgerParse) -> String {
    if parse.skipped.is_empty() {
        return "No rows skipped.\n".to_string();
    }

    let mut out = format!("⚠️  {} row(s) skipped:\n", parse.skipped.len());
    for skipped in &parse.skipped {
        out.push_str(&format!(
            "   line {:>5}: {} │ {}\n",
            skipped.line_number,
            skipped.reason,
            truncate(skipped.raw_line.trim(), 60)
        ));
    }
    out
}
