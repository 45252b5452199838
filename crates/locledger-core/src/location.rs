//! Location name resolution from free-text descriptions

use regex::Regex;

use crate::config::LedgerConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LocationResolver {
    sentinel: String,
    /// `WORD:LOCATION` hint; the colon must touch a letter
    hint_re: Regex,
    date_prefix_re: Regex,
    /// Leading category keyword, `None` when the config lists none
    keyword_re: Option<Regex>,
    column_gap_re: Regex,
}

impl LocationResolver {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let keywords: Vec<String> = config
            .location
            .noise_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        let keyword_re = if keywords.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)^(?:{})\b[\s:\-]*",
                keywords.join("|")
            ))?)
        };

        Ok(Self {
            sentinel: config.location.sentinel.clone(),
            hint_re: Regex::new(r"[A-Za-z]:[ \t]*(?P<loc>[^:]+)")?,
            date_prefix_re: Regex::new(
                r"^\d{1,2}/\d{1,2}(?:/\d{2,4})?(?:-\d{1,2}/\d{1,2}(?:/\d{2,4})?)?\s*",
            )?,
            keyword_re,
            column_gap_re: Regex::new(r"\s{2,}")?,
        })
    }

    /// Derive a presentable location name, or the sentinel
    pub fn resolve(&self, description: &str) -> String {
        self.resolve_hint(description)
            .or_else(|| self.resolve_keyword_prefix(description))
            .unwrap_or_else(|| self.sentinel.clone())
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    fn resolve_hint(&self, description: &str) -> Option<String> {
        let caps = self.hint_re.captures(description)?;
        let loc = caps.name("loc")?.as_str();
        self.usable(self.first_column(loc))
    }

    /// `[date] KEYWORD LOCATION` descriptions
    fn resolve_keyword_prefix(&self, description: &str) -> Option<String> {
        let keyword_re = self.keyword_re.as_ref()?;
        let rest = description.trim_start();
        let rest = match self.date_prefix_re.find(rest) {
            Some(m) => &rest[m.end()..],
            None => rest,
        };
        let m = keyword_re.find(rest)?;
        self.usable(self.first_column(&rest[m.end()..]))
    }

    fn first_column<'a>(&self, text: &'a str) -> &'a str {
        let text = text.trim_start();
        match self.column_gap_re.find(text) {
            Some(gap) => &text[..gap.start()],
            None => text,
        }
    }

    fn usable(&self, candidate: &str) -> Option<String> {
        let candidate = candidate.trim();
        if candidate.contains(':') || !candidate.chars().any(|c| c.is_alphabetic()) {
            return None;
        }
        Some(title_case(candidate))
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(&LedgerConfig::default()).expect("default location patterns are valid")
    }
}

/// Capitalize the first letter of each word and lowercase the rest,
/// collapsing runs of whitespace
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("LATCHFORD HOUSE"), "Latchford House");
        assert_eq!(title_case("  echo   PARK lot "), "Echo Park Lot");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_colon_hint() {
        let resolver = LocationResolver::default();
        assert_eq!(
            resolver.resolve("01/15-01/16 SECURITY:LATCHFORD HOUSE"),
            "Latchford House"
        );
        assert_eq!(
            resolver.resolve("01/22 FIRE: ECHO PARK LOT"),
            "Echo Park Lot"
        );
    }

    #[test]
    fn test_colon_hint_stops_at_column_gap() {
        let resolver = LocationResolver::default();
        assert_eq!(
            resolver.resolve("01/15 TENTS:LATCHFORD HOUSE    STAR PARTY RENTALS LLC"),
            "Latchford House"
        );
    }

    #[test]
    fn test_keyword_prefix() {
        let resolver = LocationResolver::default();
        assert_eq!(resolver.resolve("01/10 PERMITS FILM LA"), "Film La");
        assert_eq!(
            resolver.resolve("01/22-01/23 TENTS ECHO PARK  VENDOR"),
            "Echo Park"
        );
        assert_eq!(resolver.resolve("DRIVING GRIFFITH OBSERVATORY"), "Griffith Observatory");
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        let resolver = LocationResolver::default();
        assert_eq!(resolver.resolve("01/10 FIREHOUSE ROW"), "General");
    }

    #[test]
    fn test_falls_back_to_sentinel() {
        let resolver = LocationResolver::default();
        assert_eq!(resolver.resolve(""), "General");
        assert_eq!(resolver.resolve("01/15-01/16"), "General");
        assert_eq!(resolver.resolve("01/20 SECURITY"), "General");
        assert_eq!(resolver.resolve("MISC ADJUSTMENT"), "General");
        assert_eq!(resolver.resolve("01/20 ECHO PARK"), "General");
    }

    #[test]
    fn test_payroll_description_has_no_location() {
        let resolver = LocationResolver::default();
        assert_eq!(
            resolver.resolve("10/25/25 : ALBIN, W : OVERTIME 1.5X"),
            "General"
        );
    }
}
