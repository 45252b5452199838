//! Account code → spend category mapping
//!
//! Most accounts map straight to one category. The catch-all account mixes
//! permits, rentals and location fees, so its rows are subcategorized by
//! scanning the description against ordered keyword sets. Set order is
//! significant: a description mentioning both a permit and a rental item
//! resolves to whichever set comes first (Permits in the default config).

use std::collections::BTreeMap;

use crate::config::LedgerConfig;
use crate::models::Category;

#[derive(Debug, Clone)]
pub struct Categorizer {
    codes: BTreeMap<String, Category>,
    catch_all: String,
    /// (category, lowercased keywords) in check order
    keyword_sets: Vec<(Category, Vec<String>)>,
    fallback: Category,
    default: Category,
}

impl Categorizer {
    pub fn new(config: &LedgerConfig) -> Self {
        let keyword_sets = config
            .subcategories
            .iter()
            .map(|set| {
                let keywords = set
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (set.category, keywords)
            })
            .collect();

        Self {
            codes: config.accounts.codes.clone(),
            catch_all: config.accounts.catch_all.clone(),
            keyword_sets,
            fallback: config.fallback.category,
            default: config.accounts.default,
        }
    }

    /// Assign a category from the account code and row description
    pub fn categorize(&self, account_code: &str, description: &str) -> Category {
        if account_code == self.catch_all {
            return self.subcategorize(description);
        }

        self.codes
            .get(account_code)
            .copied()
            .unwrap_or(self.default)
    }

    /// Keyword pass for the catch-all account
    pub fn subcategorize(&self, description: &str) -> Category {
        let desc_lower = description.to_lowercase();
        self.keyword_sets
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| desc_lower.contains(k.as_str())))
            .map(|(category, _)| *category)
            .unwrap_or(self.fallback)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordSet;

    #[test]
    fn test_direct_mapping() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize("6304", "anything"), Category::Security);
        assert_eq!(categorizer.categorize("6305", "permit"), Category::Police);
        assert_eq!(categorizer.categorize("6307", "tent rental"), Category::Fire);
    }

    #[test]
    fn test_unknown_code_defaults_to_loc_fees() {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize("9999", "tent"), Category::LocFees);
    }

    #[test]
    fn test_catch_all_keywords() {
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize("6342", "01/10 PERMITS FILM LA"),
            Category::Permits
        );
        assert_eq!(
            categorizer.categorize("6342", "01/15 TENTS:LATCHFORD HOUSE"),
            Category::Rentals
        );
        assert_eq!(
            categorizer.categorize("6342", "01/12 LAYOUT:ECHO PARK LOT"),
            Category::LocFees
        );
        assert_eq!(
            categorizer.categorize("6342", "Filming License renewal"),
            Category::Permits
        );
    }

    #[test]
    fn test_permit_beats_rental_keyword() {
        let categorizer = Categorizer::default();
        let desc = "01/15 PERMIT FOR TENT AND GENERATOR:LATCHFORD HOUSE";
        assert_eq!(categorizer.categorize("6342", desc), Category::Permits);
        // Rental beats location fee
        assert_eq!(
            categorizer.categorize("6342", "SCOUT DAY HEATER"),
            Category::Rentals
        );
    }

    #[test]
    fn test_catch_all_without_keywords_falls_back_to_rentals() {
        let categorizer = Categorizer::default();
        assert_eq!(
            categorizer.categorize("6342", "01/20 MISC:ECHO PARK"),
            Category::Rentals
        );
        assert_eq!(categorizer.categorize("6342", ""), Category::Rentals);
    }

    #[test]
    fn test_categorize_is_deterministic() {
        let categorizer = Categorizer::default();
        let desc = "01/15-01/16 RESTROOM TRAILER PERMIT";
        let first = categorizer.categorize("6342", desc);
        for _ in 0..5 {
            assert_eq!(categorizer.categorize("6342", desc), first);
        }
    }

    #[test]
    fn test_custom_keyword_order() {
        let mut config = LedgerConfig::default();
        config.subcategories = vec![
            KeywordSet {
                category: Category::Rentals,
                keywords: vec!["tent".to_string()],
            },
            KeywordSet {
                category: Category::Permits,
                keywords: vec!["permit".to_string()],
            },
        ];
        let categorizer = Categorizer::new(&config);
        assert_eq!(
            categorizer.categorize("6342", "PERMIT FOR TENT"),
            Category::Rentals
        );
    }
}
