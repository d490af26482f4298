//! Error types for the Specter client.

use thiserror::Error;

/// Result type for Specter client operations.
pub type Result<T> = std::result::Result<T, SpecterError>;

#[derive(Debug, Error)]
pub enum SpecterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Specter unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Specter returned HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Malformed Specter response: {0}")]
    MalformedResponse(String),
}
