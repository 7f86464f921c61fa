//! Core error types for taxlog

use std::path::Path;
use thiserror::Error;

/// Main error type for taxlog operations
#[derive(Error, Debug)]
pub enum TaxlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for taxlog operations
pub type TaxlogResult<T> = Result<T, TaxlogError>;

impl TaxlogError {
    /// Parse error pinned to a line of a dump file (1-based)
    pub fn parse_at(path: &Path, line: usize, message: impl AsRef<str>) -> Self {
        TaxlogError::Parse(format!(
            "{}:{}: {}",
            path.display(),
            line,
            message.as_ref()
        ))
    }
}

impl From<anyhow::Error> for TaxlogError {
    fn from(err: anyhow::Error) -> Self {
        TaxlogError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for TaxlogError {
    fn from(err: toml::de::Error) -> Self {
        TaxlogError::Configuration(format!("Failed to parse config: {}", err))
    }
}

impl From<toml::ser::Error> for TaxlogError {
    fn from(err: toml::ser::Error) -> Self {
        TaxlogError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
