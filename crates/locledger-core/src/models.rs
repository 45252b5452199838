//! Domain models for locledger

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spend category assigned to a cost entry
///
/// Derived from the account code (and, for the catch-all account, from the
/// description), never copied from the report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Security,
    Police,
    Fire,
    Rentals,
    Permits,
    LocFees,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Police => "Police",
            Self::Fire => "Fire",
            Self::Rentals => "Rentals",
            Self::Permits => "Permits",
            Self::LocFees => "LocFees",
        }
    }

    /// Get all categories
    pub fn all() -> &'static [Category] {
        &[
            Self::Security,
            Self::Police,
            Self::Fire,
            Self::Rentals,
            Self::Permits,
            Self::LocFees,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "police" => Ok(Self::Police),
            "fire" => Ok(Self::Fire),
            "rentals" | "rental" => Ok(Self::Rentals),
            "permits" | "permit" => Ok(Self::Permits),
            "locfees" | "loc_fees" | "location_fees" => Ok(Self::LocFees),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which row grammar produced the structured fields of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowGrammar {
    /// `MM/DD/YY : LASTNAME, INITIAL : PAYTYPE` descriptions
    Payroll,
    /// Date range plus `CATEGORY:LOCATION` hint descriptions
    Narrative,
    /// Neither grammar matched; description was synthesized
    Unstructured,
}

impl RowGrammar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payroll => "payroll",
            Self::Narrative => "narrative",
            Self::Unstructured => "unstructured",
        }
    }
}

impl std::fmt::Display for RowGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line item extracted from a ledger report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEntry {
    /// Stable ID derived from line number, account and raw line
    pub id: String,
    /// 1-based line number in the source text
    pub line_number: usize,
    pub account_code: String,
    pub account_name: String,
    pub episode: Option<String>,
    pub location: String,
    pub category: Category,
    pub description: String,
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<String>,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub grammar: RowGrammar,
    pub raw_line: String,
}

/// Entries sharing one (episode, location) key with their subtotals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResult {
    /// Episode code, or "unknown" when the rows carried none
    pub episode: String,
    pub location: String,
    pub entries: Vec<CostEntry>,
    pub by_category: BTreeMap<Category, Decimal>,
    pub total: Decimal,
}

/// Why a candidate row produced no entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Row appeared before any `Acct:` header
    NoActiveSection,
    /// Leading code differs from the active section's code
    AccountMismatch { expected: String, found: String },
    /// No trailing `N.NN` amount token
    MissingAmount,
    /// Amount parsed as exactly zero
    ZeroAmount,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveSection => write!(f, "no active account section"),
            Self::AccountMismatch { expected, found } => {
                write!(f, "account {} does not match section {}", found, expected)
            }
            Self::MissingAmount => write!(f, "no trailing amount"),
            Self::ZeroAmount => write!(f, "zero amount"),
        }
    }
}

/// A candidate row that was dropped, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
    pub raw_line: String,
}

/// Result of parsing one ledger report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerParse {
    pub entries: Vec<CostEntry>,
    pub grouped: Vec<GroupedResult>,
    pub entries_found: usize,
    pub total_amount: Decimal,
    /// Dropped candidate rows; not part of the JSON payload
    #[serde(skip)]
    pub skipped: Vec<SkippedLine>,
}
