//! Format detection command

use std::path::Path;

use anyhow::Result;
use locledger_core::is_ledger_format;

use super::read_report;

pub fn cmd_detect(file: &Path) -> Result<()> {
    let text = read_report(file)?;

    if is_ledger_format(&text) {
        println!("✓ {} is a General Ledger report", file.display());
    } else {
        println!("✗ {} is not a General Ledger report", file.display());
    }

    Ok(())
}
