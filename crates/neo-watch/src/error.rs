//! Error types for neo-watch

use thiserror::Error;

/// Result type alias for neo-watch operations
pub type Result<T> = std::result::Result<T, Error>;

/// neo-watch errors
#[derive(Debug, Error)]
pub enum Error {
    /// A date string did not match its fixed format
    #[error("Malformed {field} '{value}' (expected format '{format}'): {source}")]
    MalformedDate {
        field: &'static str,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A close-approach record lacks a required field
    #[error("Close-approach record is missing field '{field}'")]
    MissingField { field: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Historic date store error
    #[error("History store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a malformed date error
    pub fn malformed_date(
        field: &'static str,
        value: impl Into<String>,
        format: impl Into<String>,
        source: chrono::ParseError,
    ) -> Self {
        Self::MalformedDate {
            field,
            value: value.into(),
            format: format.into(),
            source,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Whether this error describes bad upstream data rather than a local fault
    pub fn is_data_quality(&self) -> bool {
        matches!(self, Error::MalformedDate { .. } | Error::MissingField { .. })
    }
}
