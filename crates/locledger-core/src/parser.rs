//! Ledger report parsing pipeline
//!
//! Detection gates the pipeline, then a single fold over the lines threads
//! the scan state (active account section) through the scanner, hands rows
//! to the extractor and collects entries. Grouping happens once at the end.

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::aggregate::{aggregate, total_amount};
use crate::categorize::Categorizer;
use crate::config::LedgerConfig;
use crate::detect::is_ledger_format;
use crate::error::{Error, Result};
use crate::extract::LineExtractor;
use crate::location::LocationResolver;
use crate::models::{CostEntry, LedgerParse, RowGrammar, SkipReason, SkippedLine};
use crate::scanner::{AccountSection, ScanEvent, ScanState, SectionScanner};

/// Parser for General Ledger location-cost reports
///
/// Holds only compiled configuration; `parse` takes `&self` and keeps all
/// per-document state local, so one parser can serve many documents.
#[derive(Debug, Clone)]
pub struct LedgerParser {
    scanner: SectionScanner,
    extractor: LineExtractor,
    categorizer: Categorizer,
    locations: LocationResolver,
}

impl LedgerParser {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        Ok(Self {
            scanner: SectionScanner::new(config),
            extractor: LineExtractor::new(config)?,
            categorizer: Categorizer::new(config),
            locations: LocationResolver::new(config)?,
        })
    }

    /// Parse report text into entries and grouped subtotals
    ///
    /// Returns [`Error::UnrecognizedFormat`] when the text carries no ledger
    /// markers. Malformed rows never fail the parse; they are dropped and
    /// listed in [`LedgerParse::skipped`].
    pub fn parse(&self, text: &str) -> Result<LedgerParse> {
        if !is_ledger_format(text) {
            return Err(Error::UnrecognizedFormat);
        }

        let mut state = ScanState::new();
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for line in text.lines() {
            let outcome = match self.scanner.step(&mut state, line) {
                ScanEvent::Noise | ScanEvent::SectionStart => continue,
                ScanEvent::Skipped(reason) => Err(reason),
                ScanEvent::Row(row) => match state.section() {
                    Some(section) => self.parse_row(row, state.line_number(), section),
                    None => Err(SkipReason::NoActiveSection),
                },
            };

            match outcome {
                Ok(entry) => entries.push(entry),
                Err(reason) => {
                    debug!(line = state.line_number(), %reason, "Dropping row");
                    skipped.push(SkippedLine {
                        line_number: state.line_number(),
                        reason,
                        raw_line: line.to_string(),
                    });
                }
            }
        }

        let grouped = aggregate(&entries);
        let total = total_amount(&entries);

        info!(
            entries = entries.len(),
            groups = grouped.len(),
            skipped = skipped.len(),
            total = %total,
            "Parsed ledger report"
        );

        Ok(LedgerParse {
            entries_found: entries.len(),
            total_amount: total,
            entries,
            grouped,
            skipped,
        })
    }

    /// Build one cost entry from a row of the active section
    pub fn parse_row(
        &self,
        line: &str,
        line_number: usize,
        section: &AccountSection,
    ) -> std::result::Result<CostEntry, SkipReason> {
        let fields = self.extractor.extract(line, &section.name)?;

        let category = self.categorizer.categorize(&section.code, &fields.description);
        let location = match fields.grammar {
            RowGrammar::Unstructured => self.locations.sentinel().to_string(),
            _ => self.locations.resolve(&fields.description),
        };

        Ok(CostEntry {
            id: entry_id(line_number, &section.code, line),
            line_number,
            account_code: section.code.clone(),
            account_name: section.name.clone(),
            episode: fields.episode,
            location,
            category,
            description: fields.description,
            vendor: fields.vendor,
            transaction_number: fields.transaction_number,
            person_name: fields.person_name,
            pay_type: fields.pay_type,
            amount: fields.amount,
            date: fields.date,
            grammar: fields.grammar,
            raw_line: line.to_string(),
        })
    }

    /// Parse a single row outside a document scan
    ///
    /// The row is attributed to the given account without checking its
    /// leading token. Returns `None` for rows without a usable amount.
    pub fn parse_line(&self, line: &str, account_code: &str, account_name: &str) -> Option<CostEntry> {
        let section = AccountSection {
            code: account_code.to_string(),
            name: account_name.to_string(),
            header_line: 0,
            last_line: 1,
        };
        self.parse_row(line, 1, &section).ok()
    }
}

impl Default for LedgerParser {
    fn default() -> Self {
        Self::new(&LedgerConfig::default()).expect("default ledger patterns are valid")
    }
}

/// Stable entry ID from the row's position and content
fn entry_id(line_number: usize, account_code: &str, raw_line: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((line_number as u64).to_be_bytes());
    hasher.update(account_code.as_bytes());
    hasher.update(raw_line.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(16);
    id
}
