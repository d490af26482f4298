//! Minimal OpenAI chat completions client.
//!
//! One operation: send a conversation, get back the text of the first choice.
//! Error bodies are reduced to OpenAI's own `error.message`.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ChatRequest, OpenAIClient};
//!
//! let client = OpenAIClient::new(api_key);
//! let reply = client
//!     .chat_completion(
//!         ChatRequest::with_prompts("gpt-4.1", "You are a VC analyst", "Summarize Acme")
//!             .temperature(0.0),
//!     )
//!     .await?;
//! println!("{}", reply.content);
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::{strip_code_blocks, ChatRequest, ChatResponse, Message, Role, Usage, DEFAULT_MODEL};

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

const BASE_URL: &str = "https://api.openai.com/v1";

/// Long notes can take well over a minute to generate.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct OpenAIClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point at a proxy or compatible gateway instead of api.openai.com.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a chat completion and return the first choice.
    ///
    /// An empty or missing completion is a [`OpenAIError::Parse`].
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let started = Instant::now();
        let (status, is_json, body) = self.post("chat/completions", &request).await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            warn!(status = status.as_u16(), message = %message, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message,
            });
        }
        if !is_json {
            return Err(OpenAIError::Parse("expected a JSON response".into()));
        }

        let reply = parse_completion(&body)?;
        debug!(
            model = %request.model,
            finish_reason = reply.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = reply.usage.map(|u| u.total_tokens),
            duration_ms = started.elapsed().as_millis() as u64,
            "OpenAI chat completion"
        );

        Ok(reply)
    }

    /// POST a JSON body; returns the status, whether the reply is JSON, and
    /// the reply text.
    async fn post(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<(StatusCode, bool, String)> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        let text = response
            .text()
            .await
            .map_err(|e| OpenAIError::Network(e.to_string()))?;

        Ok((status, is_json, text))
    }
}

/// OpenAI's `error.message`, or the raw body when it is not an error envelope.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<types::ErrorBody>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

fn parse_completion(body: &str) -> Result<ChatResponse> {
    let parsed: types::CompletionBody =
        serde_json::from_str(body).map_err(|e| OpenAIError::Parse(e.to_string()))?;

    let Some(choice) = parsed.choices.into_iter().next() else {
        return Err(empty_completion());
    };
    let content = match choice.message.content {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(empty_completion()),
    };

    Ok(ChatResponse {
        content,
        finish_reason: choice.finish_reason,
        usage: parsed.usage,
    })
}

fn empty_completion() -> OpenAIError {
    OpenAIError::Parse("Received an empty response from OpenAI".into())
}
