//! Error types for axiom-core

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard error types
///
/// A missing cache snapshot is not an error: cache lookups return `Option`.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Network failure or non-2xx response from the email analysis backend
    #[error("Failed to fetch emails: {0}")]
    Fetch(String),

    /// Response body did not have the `{emails, frustration_summary}` shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Snapshot cache read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Fetch(err.to_string())
    }
}
