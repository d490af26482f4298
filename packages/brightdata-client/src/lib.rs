//! Pure Bright Data dataset API client.
//!
//! A minimal client for Bright Data's asynchronous dataset collection API.
//! Supports triggering a collection, polling a snapshot until it is ready,
//! and normalizing scraped LinkedIn profile records.
//!
//! # Example
//!
//! ```rust,ignore
//! use brightdata_client::{BrightDataClient, PollPolicy, PollOutcome};
//!
//! let client = BrightDataClient::new("api-token", "gd_dataset");
//!
//! let handle = client.trigger(&["https://linkedin.com/in/someone".into()]).await?;
//! if let PollOutcome::Ready(records) =
//!     brightdata_client::wait_for_results(&client, &handle, &PollPolicy::default()).await?
//! {
//!     let profiles = brightdata_client::normalize_profiles(&records);
//! }
//! ```

pub mod error;
pub mod poll;
pub mod profile;
pub mod types;

pub use error::{BrightDataError, Result};
pub use poll::{wait_for_results, PollOutcome, PollPolicy, SnapshotSource};
pub use profile::{normalize_profiles, Education, EnrichedProfile, Experience, NOT_AVAILABLE};
pub use types::{JobHandle, JobStatus, TriggerItem, TriggerResponse};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

const BASE_URL: &str = "https://api.brightdata.com";

/// Per-request timeout for trigger and snapshot calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Snapshot `status` values that mean the collection is still running.
const PENDING_STATES: &[&str] = &["running", "building", "collecting", "starting", "pending"];

#[derive(Clone)]
pub struct BrightDataClient {
    client: reqwest::Client,
    token: String,
    dataset_id: String,
    base_url: String,
}

impl BrightDataClient {
    pub fn new(token: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            token: token.into(),
            dataset_id: dataset_id.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Start a collection for the given URLs. Returns immediately with the snapshot handle.
    ///
    /// Every call creates a new upstream job, so this is never retried here.
    pub async fn trigger(&self, items: &[String]) -> Result<JobHandle> {
        if items.is_empty() {
            return Err(BrightDataError::InvalidInput(
                "at least one item is required".into(),
            ));
        }
        if items.iter().any(|item| item.trim().is_empty()) {
            return Err(BrightDataError::InvalidInput(
                "items must not be blank".into(),
            ));
        }

        let input: Vec<TriggerItem> = items
            .iter()
            .map(|url| TriggerItem { url: url.clone() })
            .collect();

        let url = format!("{}/datasets/v3/trigger", self.base_url);
        tracing::debug!(%url, count = input.len(), "Triggering Bright Data collection");

        let resp = self
            .client
            .post(&url)
            .query(&[
                ("dataset_id", self.dataset_id.as_str()),
                ("include_errors", "true"),
            ])
            .bearer_auth(&self.token)
            .json(&input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Bright Data trigger rejected");
            return Err(BrightDataError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = read_json(resp).await?;
        let handle = handle_from_trigger(body)?;
        tracing::info!(handle = %handle, count = items.len(), "Bright Data collection started");
        Ok(handle)
    }

    /// Query a snapshot once.
    pub async fn poll(&self, handle: &JobHandle) -> Result<JobStatus> {
        validate_handle(handle)?;

        let url = format!("{}/datasets/v3/snapshot/{}", self.base_url, handle);
        let resp = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(handle = %handle, status = status.as_u16(), "Snapshot poll response");

        if status == reqwest::StatusCode::ACCEPTED {
            return Ok(JobStatus::Pending);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BrightDataError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        classify_snapshot(read_json(resp).await?)
    }
}

#[async_trait]
impl SnapshotSource for BrightDataClient {
    async fn poll(&self, handle: &JobHandle) -> Result<JobStatus> {
        BrightDataClient::poll(self, handle).await
    }
}

/// Read a 2xx body, refusing anything that is not declared as JSON.
async fn read_json(resp: reqwest::Response) -> Result<Value> {
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await?;
    parse_json_body(content_type.as_deref(), &body)
}

fn parse_json_body(content_type: Option<&str>, body: &str) -> Result<Value> {
    match content_type {
        Some(ct) if ct.to_ascii_lowercase().contains("json") => {}
        other => {
            return Err(BrightDataError::MalformedResponse(format!(
                "expected JSON, got content-type {}",
                other.unwrap_or("<none>")
            )))
        }
    }

    serde_json::from_str(body).map_err(|e| BrightDataError::MalformedResponse(e.to_string()))
}

fn handle_from_trigger(body: Value) -> Result<JobHandle> {
    let trigger: TriggerResponse = serde_json::from_value(body)
        .map_err(|e| BrightDataError::MalformedResponse(e.to_string()))?;

    trigger
        .snapshot_id
        .filter(|id| !id.trim().is_empty())
        .map(JobHandle::new)
        .ok_or(BrightDataError::MissingHandle)
}

fn validate_handle(handle: &JobHandle) -> Result<()> {
    let id = handle.as_str();
    if id.trim().is_empty() {
        return Err(BrightDataError::InvalidInput("handle is required".into()));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(BrightDataError::InvalidInput(format!(
            "handle {id:?} is not a valid snapshot id"
        )));
    }
    Ok(())
}

fn classify_snapshot(body: Value) -> Result<JobStatus> {
    match body {
        Value::Array(records) if records.is_empty() => Ok(JobStatus::Empty),
        Value::Array(records) => Ok(JobStatus::Ready(records)),
        Value::Object(map) => {
            let state = map.get("status").and_then(Value::as_str);
            match state {
                Some(s) if PENDING_STATES.contains(&s) => Ok(JobStatus::Pending),
                Some("failed") => Err(BrightDataError::JobFailed(
                    map.get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("no reason given")
                        .to_string(),
                )),
                _ => Err(BrightDataError::MalformedResponse(
                    "snapshot body is neither a record array nor a status object".into(),
                )),
            }
        }
        _ => Err(BrightDataError::MalformedResponse(
            "snapshot body is not a JSON array".into(),
        )),
    }
}
