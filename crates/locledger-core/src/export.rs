//! CSV export of extracted cost entries

use crate::error::{Error, Result};
use crate::models::CostEntry;

const HEADER: [&str; 13] = [
    "line",
    "account_code",
    "account_name",
    "episode",
    "location",
    "category",
    "date",
    "description",
    "vendor",
    "transaction_number",
    "person_name",
    "pay_type",
    "amount",
];

/// Render entries as CSV, one row per entry in input order
pub fn entries_to_csv(entries: &[CostEntry]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;

    for entry in entries {
        let line = entry.line_number.to_string();
        let date = entry.date.map(|d| d.to_string()).unwrap_or_default();
        let amount = format!("{:.2}", entry.amount);
        wtr.write_record([
            line.as_str(),
            entry.account_code.as_str(),
            entry.account_name.as_str(),
            entry.episode.as_deref().unwrap_or(""),
            entry.location.as_str(),
            entry.category.as_str(),
            date.as_str(),
            entry.description.as_str(),
            entry.vendor.as_deref().unwrap_or(""),
            entry.transaction_number.as_deref().unwrap_or(""),
            entry.person_name.as_deref().unwrap_or(""),
            entry.pay_type.as_deref().unwrap_or(""),
            amount.as_str(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RowGrammar};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn payroll_entry() -> CostEntry {
        CostEntry {
            id: "abc".to_string(),
            line_number: 12,
            account_code: "6305".to_string(),
            account_name: "LOCATION POLICE".to_string(),
            episode: Some("101".to_string()),
            location: "General".to_string(),
            category: Category::Police,
            description: "10/25/25 : ALBIN, W : REGULAR 1X".to_string(),
            vendor: Some("ENTERTAINMENT PARTNERS".to_string()),
            transaction_number: Some("1449".to_string()),
            person_name: Some("ALBIN, W".to_string()),
            pay_type: Some("REGULAR 1X".to_string()),
            amount: Decimal::from_str("619.2").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 10, 25),
            grammar: RowGrammar::Payroll,
            raw_line: String::new(),
        }
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = entries_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("line,account_code,account_name,episode,location"));
    }

    #[test]
    fn test_export_quotes_fields_with_commas() {
        let csv = entries_to_csv(&[payroll_entry()]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("12,6305,LOCATION POLICE,101,General,Police,2025-10-25,"));
        assert!(row.contains("\"10/25/25 : ALBIN, W : REGULAR 1X\""));
        assert!(row.contains("\"ALBIN, W\""));
        assert!(row.ends_with(",619.20"));
    }

    #[test]
    fn test_export_blank_optional_fields() {
        let mut entry = payroll_entry();
        entry.episode = None;
        entry.date = None;
        entry.vendor = None;
        entry.transaction_number = None;
        entry.person_name = None;
        entry.pay_type = None;
        entry.description = "LOCATION POLICE charge".to_string();
        let csv = entries_to_csv(&[entry]).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "12,6305,LOCATION POLICE,,General,Police,,LOCATION POLICE charge,,,,,619.20"
        );
    }
}
