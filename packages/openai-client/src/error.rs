//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("OpenAI returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// 2xx response that is not a usable completion
    #[error("Parse error: {0}")]
    Parse(String),
}
