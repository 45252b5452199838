//! Locledger Core Library
//!
//! Extraction engine for General Ledger detail reports of location costs:
//! - Format detection for ledger report text
//! - Section scanning over `Acct:` headers
//! - Row classification (payroll and narrative grammars) and field extraction
//! - Account/keyword categorization and location resolution
//! - Aggregation by (episode, location) with per-category subtotals
//! - CSV export of extracted entries

pub mod aggregate;
pub mod categorize;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod location;
pub mod models;
pub mod parser;
pub mod scanner;

pub use aggregate::{aggregate, total_amount, UNKNOWN_EPISODE};
pub use categorize::Categorizer;
pub use config::{default_config_path, LedgerConfig, DEFAULT_CONFIG};
pub use detect::is_ledger_format;
pub use error::{Error, Result};
pub use export::entries_to_csv;
pub use extract::{LineExtractor, RowFields};
pub use location::LocationResolver;
pub use models::{
    Category, CostEntry, GroupedResult, LedgerParse, RowGrammar, SkipReason, SkippedLine,
};
pub use parser::LedgerParser;
pub use scanner::{AccountSection, ScanEvent, ScanState, SectionScanner};

/// Parse ledger report text with the default configuration
pub fn parse_ledger(text: &str) -> Result<LedgerParse> {
    LedgerParser::new(&LedgerConfig::default())?.parse(text)
}
