//! Error types for the title lookup
//!
//! Only the fetch layer produces errors. The dialogue never sees them:
//! `Extractor::search` collapses every failure into an empty result set.

use thiserror::Error;

/// Error type for lookup operations
#[derive(Error, Debug)]
pub enum LookupError {
    /// HTTP request failed (connection, timeout, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status code
    #[error("Provider returned HTTP status {0}")]
    Status(u16),

    /// Search query was rejected before sending
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;
