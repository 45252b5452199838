//! Error types for locledger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a General Ledger report: no ledger markers found in input text")]
    UnrecognizedFormat,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
