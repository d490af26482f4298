//! Error types for the Bright Data client.

use thiserror::Error;

/// Result type for Bright Data client operations.
pub type Result<T> = std::result::Result<T, BrightDataError>;

/// Bright Data client errors.
#[derive(Debug, Error)]
pub enum BrightDataError {
    /// Caller supplied nothing to work on (empty item list, blank handle)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Connection failed, timed out or the body could not be read
    #[error("Bright Data unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Bright Data returned HTTP {status}")]
    Rejected { status: u16, body: String },

    /// 2xx response that is not the JSON we expect
    #[error("Malformed Bright Data response: {0}")]
    MalformedResponse(String),

    /// Trigger succeeded but carried no snapshot id
    #[error("Bright Data trigger response did not include a snapshot_id")]
    MissingHandle,

    /// Snapshot reported a terminal failure state
    #[error("Bright Data snapshot failed: {0}")]
    JobFailed(String),

    /// Wait budget exhausted before the snapshot was ready
    #[error("Snapshot {handle} not ready after {attempts} polls ({waited_secs}s)")]
    Timeout {
        handle: String,
        attempts: u32,
        waited_secs: u64,
    },
}
