//! Ledger configuration
//!
//! Holds the format-specific tables of the engine: the account code mapping,
//! the ordered keyword sets for the catch-all account, scanner noise labels,
//! vendor suffixes and the episode numbering range.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override (explicit path, else ~/.local/share/locledger/config/ledger.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Category;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/ledger.toml");

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub accounts: AccountsConfig,
    /// Keyword sets for the catch-all account, in check order
    pub subcategories: Vec<KeywordSet>,
    pub fallback: FallbackConfig,
    pub location: LocationConfig,
    pub scanner: ScannerConfig,
    pub vendors: VendorConfig,
    pub episodes: EpisodeRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Account whose rows are subcategorized by keyword
    pub catch_all: String,
    /// Category for codes missing from `codes`
    pub default: Category,
    /// Direct account code → category mapping
    #[serde(default)]
    pub codes: BTreeMap<String, Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub sentinel: String,
    #[serde(default)]
    pub noise_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub noise_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorConfig {
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRange {
    pub min: u16,
    pub max: u16,
}

impl EpisodeRange {
    pub fn contains(&self, episode: u16) -> bool {
        (self.min..=self.max).contains(&episode)
    }
}

impl LedgerConfig {
    /// Load configuration, preferring `override_path`, then the per-user
    /// override, then the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match resolve_config_path(override_path) {
            Some(path) => {
                debug!("Loading ledger config from {}", path.display());
                fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?
            }
            None => DEFAULT_CONFIG.to_string(),
        };

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        let codes = std::iter::once(&self.accounts.catch_all).chain(self.accounts.codes.keys());
        for code in codes {
            if !is_account_code(code) {
                return Err(Error::Config(format!(
                    "Account code must be 4 digits: {:?}",
                    code
                )));
            }
        }

        if self.subcategories.is_empty() {
            return Err(Error::Config(
                "At least one [[subcategories]] keyword set is required".into(),
            ));
        }
        for set in &self.subcategories {
            if set.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "Keyword set for {} has no keywords",
                    set.category
                )));
            }
        }

        if self.location.sentinel.trim().is_empty() {
            return Err(Error::Config("Location sentinel must not be empty".into()));
        }

        if self.vendors.suffixes.iter().all(|s| s.trim().is_empty()) {
            return Err(Error::Config("At least one vendor suffix is required".into()));
        }

        let EpisodeRange { min, max } = self.episodes;
        if min < 100 || max > 999 || min > max {
            return Err(Error::Config(format!(
                "Episode range must be three-digit and ordered, got {}..={}",
                min, max
            )));
        }

        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        // The embedded file is covered by tests
        Self::from_toml(DEFAULT_CONFIG).expect("embedded ledger config is valid")
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("locledger").join("config").join("ledger.toml"))
}

/// Pick the override file to read, if any exists
fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!("Config override {} not found, falling back", path.display());
    }

    default_config_path().filter(|p| p.exists())
}

pub(crate) fn is_account_code(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = LedgerConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.accounts.catch_all, "6342");
        assert_eq!(config.accounts.default, Category::LocFees);
        assert_eq!(config.accounts.codes.get("6304"), Some(&Category::Security));
        assert_eq!(config.accounts.codes.get("6305"), Some(&Category::Police));
        assert_eq!(config.accounts.codes.get("6307"), Some(&Category::Fire));
        assert_eq!(config.fallback.category, Category::Rentals);
        assert_eq!(config.location.sentinel, "General");
    }

    #[test]
    fn test_default_keyword_order() {
        let config = LedgerConfig::default();
        let order: Vec<Category> = config.subcategories.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![Category::Permits, Category::Rentals, Category::LocFees]
        );
    }

    #[test]
    fn test_episode_range_contains() {
        let range = EpisodeRange { min: 101, max: 199 };
        assert!(range.contains(101));
        assert!(range.contains(199));
        assert!(!range.contains(100));
        assert!(!range.contains(200));
    }

    #[test]
    fn test_rejects_bad_account_code() {
        let content = DEFAULT_CONFIG.replace("\"6304\" = \"Security\"", "\"63A4\" = \"Security\"");
        let err = LedgerConfig::from_toml(&content).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unordered_episode_range() {
        let content = DEFAULT_CONFIG
            .replace("min = 100", "min = 500")
            .replace("max = 999", "max = 200");
        assert!(LedgerConfig::from_toml(&content).is_err());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let content = DEFAULT_CONFIG.replace("\"6307\" = \"Fire\"", "\"6307\" = \"Catering\"");
        assert!(LedgerConfig::from_toml(&content).is_err());
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.toml");
        let content = DEFAULT_CONFIG.replace("catch_all = \"6342\"", "catch_all = \"6350\"");
        fs::write(&path, content).unwrap();

        let config = LedgerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.accounts.catch_all, "6350");
    }

    #[test]
    fn test_load_missing_override_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config = LedgerConfig::load(Some(&path)).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_to_toml_reparses() {
        let config = LedgerConfig::default();
        let rendered = config.to_toml().unwrap();
        assert_eq!(LedgerConfig::from_toml(&rendered).unwrap(), config);
    }
}
