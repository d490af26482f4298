//! Pure Specter REST API client.
//!
//! Company lookups and founder listings from Specter's company/people data.
//! Responses other than the people listing are passed through as raw JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use specter_client::SpecterClient;
//!
//! let client = SpecterClient::new("api-key");
//! let founders = client.founders("company-id").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, SpecterError};
pub use types::PersonSummary;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

const BASE_URL: &str = "https://app.tryspecter.com/api/v1";

#[derive(Clone)]
pub struct SpecterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpecterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Company profile, as returned by Specter.
    pub async fn company(&self, company_id: &str) -> Result<Value> {
        let id = require_id("company id", company_id)?;
        self.get_json(&format!("/companies/{id}"), &[]).await
    }

    /// Founders of a company. An empty list is a valid answer.
    pub async fn founders(&self, company_id: &str) -> Result<Vec<PersonSummary>> {
        let id = require_id("company id", company_id)?;
        let body = self
            .get_json(&format!("/companies/{id}/people"), &[("founders", "true")])
            .await?;
        people_from_listing(body)
    }

    /// Full person record, as returned by Specter.
    pub async fn person(&self, person_id: &str) -> Result<Value> {
        let id = require_id("person id", person_id)?;
        self.get_json(&format!("/people/{id}"), &[]).await
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        tracing::debug!(path, status = status.as_u16(), "Specter response");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SpecterError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        let body = resp.text().await?;
        if !is_json {
            return Err(SpecterError::MalformedResponse(
                "expected a JSON response".into(),
            ));
        }

        serde_json::from_str(&body).map_err(|e| SpecterError::MalformedResponse(e.to_string()))
    }
}

/// Ids are interpolated into the path, so only plain tokens are allowed.
fn require_id<'a>(what: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(SpecterError::InvalidInput(format!("{what} is required")));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(SpecterError::InvalidInput(format!("{what} {id:?} is invalid")));
    }
    Ok(id)
}

/// The listing is a bare array, or an array under `data`/`people`.
fn people_from_listing(body: Value) -> Result<Vec<PersonSummary>> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("people")) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SpecterError::MalformedResponse(
                    "people listing has no array".into(),
                ))
            }
        },
        Value::Null => Vec::new(),
        _ => {
            return Err(SpecterError::MalformedResponse(
                "people listing is not an array".into(),
            ))
        }
    };

    list.into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| SpecterError::MalformedResponse(e.to_string()))
        })
        .collect()
}
