//! Row classification and field extraction
//!
//! Two row layouts are observed in ledger detail reports:
//!
//! - Payroll: `10/25/25 : ALBIN, W : OVERTIME 1.5X  VENDOR  TRANS#  10/25/2025  AMOUNT`
//! - Narrative: `01/15-01/16 SECURITY:LATCHFORD HOUSE  VENDOR INC  TRANS#  AMOUNT`
//!
//! Grammars are tried in a fixed order per row (payroll first, it is the more
//! specific pattern) and the first structured match wins, so one document can
//! mix both layouts. Rows matching neither still produce an entry with a
//! synthesized description as long as they carry a valid amount.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{EpisodeRange, LedgerConfig};
use crate::error::Result;
use crate::models::{RowGrammar, SkipReason};

/// Structured grammars in check order
const GRAMMARS: [RowGrammar; 2] = [RowGrammar::Payroll, RowGrammar::Narrative];

/// Non-suffix words a vendor may take from a single-spaced narrative run
const MAX_VENDOR_WORDS: usize = 2;

/// Location words a single-spaced narrative run keeps ahead of the vendor
const MIN_LOCATION_WORDS: usize = 2;

/// Fields pulled from one data row, before categorization
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields {
    pub amount: Decimal,
    pub episode: Option<String>,
    pub date: Option<NaiveDate>,
    pub grammar: RowGrammar,
    pub description: String,
    pub person_name: Option<String>,
    pub pay_type: Option<String>,
    pub vendor: Option<String>,
    pub transaction_number: Option<String>,
}

/// Description-level match of one grammar
#[derive(Debug, Clone, PartialEq)]
struct DescriptionMatch {
    description: String,
    person_name: Option<String>,
    pay_type: Option<String>,
    /// Vendor and transaction number found inside the description run
    vendor: Option<(String, String)>,
    /// Byte offset in the row body where the description ends
    end: usize,
}

/// Vendor split off the end of a single-spaced narrative run
#[derive(Debug, Clone, PartialEq)]
struct TrailingVendor {
    /// Byte offset in the run where the vendor begins
    vendor_start: usize,
    vendor: String,
    transaction_number: String,
    /// Byte offset in the run just past the transaction number
    end: usize,
}

#[derive(Debug, Clone)]
pub struct LineExtractor {
    amount_re: Regex,
    date_re: Regex,
    short_date_re: Regex,
    payroll_re: Regex,
    narrative_re: Regex,
    vendor_re: Regex,
    suffix_txn_re: Regex,
    token_re: Regex,
    suffixes: Vec<String>,
    episodes: EpisodeRange,
}

impl LineExtractor {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let mut suffixes: Vec<String> = config
            .vendors
            .suffixes
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        // Longest first so CORPORATION is tried before CORP and CO
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let suffix_alt = suffixes
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            amount_re: Regex::new(r"(?:^|\s)(?P<amount>-?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})\s*$")?,
            date_re: Regex::new(r"\b(?P<m>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{4})\b")?,
            short_date_re: Regex::new(r"\b(?P<m>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{2})\b")?,
            payroll_re: Regex::new(
                r"(?P<date>\d{1,2}/\d{1,2}/\d{2,4})\s*:\s*(?P<person>[A-Z][A-Z'.\- ]*?,\s*[A-Z][A-Z.]*)\s*:\s*(?P<pay>[A-Z][A-Z /]*?\s\d+(?:\.\d+)?X)\b",
            )?,
            narrative_re: Regex::new(
                r"(?:^|\s)(?P<desc>\d{1,2}/\d{1,2}(?:-\d{1,2}/\d{1,2})?(?:[ ]\S+)+)",
            )?,
            vendor_re: Regex::new(&format!(
                r"(?P<vendor>[A-Z0-9&][A-Z0-9&'.,\-]*(?:[ ][A-Z0-9&'.,\-]+)*?[ ](?:{})\.?),?\s+(?P<txn>\d+)\b",
                suffix_alt
            ))?,
            suffix_txn_re: Regex::new(&format!(
                r"(?:^|[ ])(?P<suffix>(?:{})\.?),?[ ]+(?P<txn>\d+)\b",
                suffix_alt
            ))?,
            token_re: Regex::new(r"\S+")?,
            suffixes,
            episodes: config.episodes,
        })
    }

    /// Extract structured fields from a row whose leading token is the
    /// active account code
    ///
    /// Never fails hard: a row without a usable amount is reported through
    /// the returned [`SkipReason`].
    pub fn extract(&self, line: &str, account_name: &str) -> std::result::Result<RowFields, SkipReason> {
        let amount_match = self
            .amount_re
            .captures(line)
            .and_then(|caps| caps.name("amount"))
            .ok_or(SkipReason::MissingAmount)?;

        let amount: Decimal = amount_match
            .as_str()
            .replace(',', "")
            .parse()
            .map_err(|_| SkipReason::MissingAmount)?;
        if amount.is_zero() {
            return Err(SkipReason::ZeroAmount);
        }

        let body_start = leading_token_end(line);
        if amount_match.start() < body_start {
            // The only numeric token is the account code itself
            return Err(SkipReason::MissingAmount);
        }
        let body = &line[body_start..amount_match.start()];

        let episode = self.find_episode(line);
        let date = self.find_date(line);

        let described = GRAMMARS
            .iter()
            .find_map(|grammar| self.match_grammar(*grammar, body).map(|m| (*grammar, m)));

        let (grammar, description, person_name, pay_type, vendor) = match described {
            Some((grammar, m)) => {
                let vendor = m.vendor.or_else(|| self.find_vendor(&body[m.end..]));
                (grammar, m.description, m.person_name, m.pay_type, vendor)
            }
            None => {
                debug!("No row grammar matched, synthesizing description");
                (
                    RowGrammar::Unstructured,
                    format!("{} charge", account_name),
                    None,
                    None,
                    self.find_vendor(body),
                )
            }
        };

        let (vendor, transaction_number) = vendor.unzip();

        Ok(RowFields {
            amount,
            episode,
            date,
            grammar,
            description,
            person_name,
            pay_type,
            vendor,
            transaction_number,
        })
    }

    fn match_grammar(&self, grammar: RowGrammar, body: &str) -> Option<DescriptionMatch> {
        match grammar {
            RowGrammar::Payroll => {
                let caps = self.payroll_re.captures(body)?;
                let whole = caps.get(0)?;
                Some(DescriptionMatch {
                    description: collapse_whitespace(whole.as_str()),
                    person_name: Some(collapse_whitespace(&caps["person"])),
                    pay_type: Some(collapse_whitespace(&caps["pay"])),
                    vendor: None,
                    end: whole.end(),
                })
            }
            RowGrammar::Narrative => {
                let desc = self.narrative_re.captures(body)?.name("desc")?;
                let text = desc.as_str();
                // Without column gaps the run also holds the vendor columns
                if let Some(split) = self.split_trailing_vendor(text) {
                    return Some(DescriptionMatch {
                        description: text[..split.vendor_start].trim_end().to_string(),
                        person_name: None,
                        pay_type: None,
                        vendor: Some((split.vendor, split.transaction_number)),
                        end: desc.start() + split.end,
                    });
                }
                let text = &text[..self.trailing_columns_start(text)];
                Some(DescriptionMatch {
                    description: text.trim().to_string(),
                    person_name: None,
                    pay_type: None,
                    vendor: None,
                    end: desc.start() + text.len(),
                })
            }
            RowGrammar::Unstructured => None,
        }
    }

    /// First three-digit token in the configured episode range
    fn find_episode(&self, line: &str) -> Option<String> {
        line.split_whitespace()
            .filter(|token| token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()))
            .find(|token| {
                token
                    .parse::<u16>()
                    .map(|n| self.episodes.contains(n))
                    .unwrap_or(false)
            })
            .map(str::to_string)
    }

    /// First `MM/DD/YYYY` date, else first `MM/DD/YY` expanded to 20YY
    fn find_date(&self, line: &str) -> Option<NaiveDate> {
        if let Some(caps) = self.date_re.captures(line) {
            return ymd(&caps["y"], &caps["m"], &caps["d"], 0);
        }
        let caps = self.short_date_re.captures(line)?;
        ymd(&caps["y"], &caps["m"], &caps["d"], 2000)
    }

    fn find_vendor(&self, text: &str) -> Option<(String, String)> {
        let caps = self.vendor_re.captures(text)?;
        Some((caps["vendor"].trim().to_string(), caps["txn"].to_string()))
    }

    /// Split a single-spaced `DATE HINT LOCATION VENDOR SUFFIX TRANS#` run
    ///
    /// The first two tokens (date and hint or keyword) always stay in the
    /// description. The vendor takes at most [`MAX_VENDOR_WORDS`] non-suffix
    /// words walking back from the suffix, and leaves at least
    /// [`MIN_LOCATION_WORDS`] location words in front of it.
    fn split_trailing_vendor(&self, text: &str) -> Option<TrailingVendor> {
        let caps = self.suffix_txn_re.captures(text)?;
        let suffix = caps.name("suffix")?;
        let txn = caps.name("txn")?;

        let tokens: Vec<_> = self.token_re.find_iter(&text[..suffix.start()]).collect();
        if tokens.len() < 3 {
            return None;
        }
        let hint_words = tokens[1]
            .as_str()
            .split_once(':')
            .map_or(0, |(_, rest)| usize::from(!rest.is_empty()));
        let candidates = &tokens[2..];
        let location_words = hint_words
            + candidates
                .iter()
                .filter(|t| !self.is_suffix(t.as_str()))
                .count();
        let budget = MAX_VENDOR_WORDS.min(location_words.saturating_sub(MIN_LOCATION_WORDS));

        let mut vendor_start = None;
        let mut words = 0;
        for token in candidates.iter().rev() {
            let word = token.as_str();
            if !word.bytes().all(is_vendor_byte) {
                break;
            }
            if !self.is_suffix(word) {
                if words == budget {
                    break;
                }
                words += 1;
            }
            vendor_start = Some(token.start());
        }
        if words == 0 {
            return None;
        }

        let vendor_start = vendor_start?;
        Some(TrailingVendor {
            vendor_start,
            vendor: text[vendor_start..suffix.end()].to_string(),
            transaction_number: txn.as_str().to_string(),
            end: txn.end(),
        })
    }

    /// Offset of the first transaction number or full date after the
    /// date and hint tokens, else the run length
    fn trailing_columns_start(&self, text: &str) -> usize {
        self.token_re
            .find_iter(text)
            .skip(2)
            .find(|t| {
                let word = t.as_str();
                (word.len() >= 3 && word.bytes().all(|b| b.is_ascii_digit()))
                    || self.date_re.is_match(word)
            })
            .map_or(text.len(), |t| t.start())
    }

    fn is_suffix(&self, word: &str) -> bool {
        let word = word.trim_end_matches(['.', ',']);
        self.suffixes.iter().any(|s| s == word)
    }
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new(&LedgerConfig::default()).expect("default row patterns are valid")
    }
}

/// Byte offset just past the first whitespace-delimited token
fn leading_token_end(line: &str) -> usize {
    let start = line.len() - line.trim_start().len();
    line[start..]
        .find(char::is_whitespace)
        .map(|i| start + i)
        .unwrap_or(line.len())
}

fn is_vendor_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit() || b"&'.,-".contains(&b)
}

fn ymd(year: &str, month: &str, day: &str, century: i32) -> Option<NaiveDate> {
    let y: i32 = year.parse().ok()?;
    let m: u32 = month.parse().ok()?;
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(century + y, m, d)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
