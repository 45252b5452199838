//! Section scanning over report lines
//!
//! The report has no record delimiter besides the convention that every row
//! repeats its account code, so the scanner tracks the active `Acct:` header
//! and only hands a line on when its leading token equals that code.

use std::ops::RangeInclusive;

use regex::Regex;
use tracing::{debug, trace};

use crate::config::{is_account_code, LedgerConfig};
use crate::models::SkipReason;

/// Account context established by an `Acct: CODE - NAME` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSection {
    pub code: String,
    pub name: String,
    /// Header line number (1-based)
    pub header_line: usize,
    /// Last line seen while this section was active
    pub last_line: usize,
}

impl AccountSection {
    /// Lines governed by this section so far, header included
    pub fn lines(&self) -> RangeInclusive<usize> {
        self.header_line..=self.last_line
    }
}

/// Scan accumulator threaded through the line fold
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    section: Option<AccountSection>,
    line_number: usize,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active section, if a header has been seen
    pub fn section(&self) -> Option<&AccountSection> {
        self.section.as_ref()
    }

    /// 1-based number of the most recently scanned line
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// What the scanner decided about one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent<'a> {
    /// Blank line, report furniture or stray text
    Noise,
    /// A header switched the active section
    SectionStart,
    /// Line belongs to the active section and should be extracted
    Row(&'a str),
    /// Looked like a row but cannot be attributed to the active section
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub struct SectionScanner {
    header_re: Regex,
    column_gap_re: Regex,
    noise_prefixes: Vec<String>,
}

impl SectionScanner {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            header_re: Regex::new(r"^\s*Acct:\s*(?P<code>\d{4})\s*-\s*(?P<name>\S.*)")
                .expect("valid regex"),
            column_gap_re: Regex::new(r"\s{2,}").expect("valid regex"),
            noise_prefixes: config
                .scanner
                .noise_prefixes
                .iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Advance the scan by one line
    pub fn step<'a>(&self, state: &mut ScanState, line: &'a str) -> ScanEvent<'a> {
        state.line_number += 1;
        let line_number = state.line_number;
        if let Some(section) = state.section.as_mut() {
            section.last_line = line_number;
        }

        if let Some(section) = self.parse_header(line, line_number) {
            debug!(
                line = line_number,
                code = %section.code,
                name = %section.name,
                "Entering account section"
            );
            state.section = Some(section);
            return ScanEvent::SectionStart;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || self.is_noise(trimmed) {
            return ScanEvent::Noise;
        }

        let leading = trimmed.split_whitespace().next().unwrap_or_default();
        if !is_account_code(leading) {
            trace!(line = line_number, "Skipping non-row text");
            return ScanEvent::Noise;
        }

        match state.section.as_ref() {
            None => ScanEvent::Skipped(SkipReason::NoActiveSection),
            Some(section) if section.code != leading => {
                ScanEvent::Skipped(SkipReason::AccountMismatch {
                    expected: section.code.clone(),
                    found: leading.to_string(),
                })
            }
            Some(_) => ScanEvent::Row(line),
        }
    }

    fn parse_header(&self, line: &str, line_number: usize) -> Option<AccountSection> {
        let caps = self.header_re.captures(line)?;
        let name = caps.name("name")?.as_str();
        // Trailing columns (balances etc.) follow a wide gap
        let name = match self.column_gap_re.find(name) {
            Some(gap) => &name[..gap.start()],
            None => name,
        };

        Some(AccountSection {
            code: caps["code"].to_string(),
            name: name.trim().to_string(),
            header_line: line_number,
            last_line: line_number,
        })
    }

    fn is_noise(&self, trimmed: &str) -> bool {
        let lower = trimmed.to_lowercase();
        self.noise_prefixes.iter().any(|p| lower.starts_with(p.as_str()))
    }
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}
