//! Error types for the tally-core library.
//!
//! Aggregation itself never fails; these errors only arise while building an
//! engine from a custom configuration.

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration rejected by validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Currency table could not be compiled into a pattern.
    #[error("invalid currency pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration document is not valid JSON for [`crate::TallyConfig`].
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
