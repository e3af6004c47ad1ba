//! Shared error types for the library

use thiserror::Error;

/// Main error type for covmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Coverage report could not be parsed; no partial report is produced
    #[error("Malformed coverage report: {0}")]
    MalformedReport(String),

    /// A filter chain ran out of rules before reaching a verdict
    #[error("Filter chain exhausted without a verdict for {0}")]
    UnresolvedFilter(String),

    /// The change history could not be opened or read
    #[error("Change history unavailable: {0}")]
    HistoryUnavailable(#[from] git2::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed-report error
    pub fn malformed_report(message: impl Into<String>) -> Self {
        Self::MalformedReport(message.into())
    }

    /// Create an unresolved-filter error from the record that exhausted the chain
    pub fn unresolved_filter(record: impl std::fmt::Debug) -> Self {
        Self::UnresolvedFilter(format!("{record:?}"))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
