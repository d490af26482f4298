use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a Bright Data collection job (the `snapshot_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Observed state of a snapshot on a single poll.
///
/// Failures are not a variant: they surface as errors from the poll itself.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    /// Still collecting (HTTP 202 or a running status object)
    Pending,
    /// Collection finished with records
    Ready(Vec<serde_json::Value>),
    /// HTTP 200 with an empty array
    Empty,
}

/// One input row for the trigger endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerItem {
    pub url: String,
}

/// Trigger endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub snapshot_id: Option<String>,
}
