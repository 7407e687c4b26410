//! Structured error handling for the aggregation core.
//!
//! Fetch-level failures are not errors in this crate - they are modeled as
//! [`crate::resilience::FetchOutcome`] values and pattern-matched at the
//! service boundary. This enum covers the failures that genuinely abort an
//! operation: configuration problems, persistence failures, and client
//! construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CinelistError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<sqlx::Error> for CinelistError {
    fn from(err: sqlx::Error) -> Self {
        CinelistError::Database(err.to_string())
    }
}

impl From<reqwest::Error> for CinelistError {
    fn from(err: reqwest::Error) -> Self {
        CinelistError::Client(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CinelistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CinelistError::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");

        let err = CinelistError::Configuration("ttl_seconds must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: ttl_seconds must be positive"
        );
    }
}
