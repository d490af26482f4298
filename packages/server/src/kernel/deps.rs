//! Server dependencies for request handlers (using traits for testability)
//!
//! This module provides the central dependency container used by all domains.
//! All external services use trait abstractions to enable testing.

use async_trait::async_trait;
use brightdata_client::{BrightDataClient, JobHandle, PollPolicy};
use openai_client::{ChatRequest, OpenAIClient};
use serde_json::Value;
use specter_client::{PersonSummary, SpecterClient};
use std::sync::Arc;

use crate::common::AppError;
use crate::config::Config;
use crate::domains::people::ranking::{FounderRanker, LlmRanker, SeniorityRanker};
use crate::kernel::{BaseAI, BasePeopleDirectory, BaseProfileScraper};

// =============================================================================
// Provider Adapters (implement the Base* traits)
// =============================================================================

/// OpenAI chat completions pinned to one model at temperature 0.
pub struct OpenAIAdapter {
    client: OpenAIClient,
    model: String,
}

impl OpenAIAdapter {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for OpenAIAdapter {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> openai_client::Result<String> {
        let request =
            ChatRequest::with_prompts(&self.model, system_prompt, user_prompt).temperature(0.0);

        Ok(self.client.chat_completion(request).await?.content)
    }
}

#[async_trait]
impl BaseProfileScraper for BrightDataClient {
    async fn trigger(&self, items: &[String]) -> brightdata_client::Result<JobHandle> {
        BrightDataClient::trigger(self, items).await
    }
}

#[async_trait]
impl BasePeopleDirectory for SpecterClient {
    async fn company(&self, company_id: &str) -> specter_client::Result<Value> {
        SpecterClient::company(self, company_id).await
    }

    async fn founders(&self, company_id: &str) -> specter_client::Result<Vec<PersonSummary>> {
        SpecterClient::founders(self, company_id).await
    }

    async fn person(&self, person_id: &str) -> specter_client::Result<Value> {
        SpecterClient::person(self, person_id).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
///
/// Providers are optional: a deployment without a key still serves the
/// routes that do not need it.
#[derive(Clone)]
pub struct ServerDeps {
    pub ai: Option<Arc<dyn BaseAI>>,
    pub scraper: Option<Arc<dyn BaseProfileScraper>>,
    pub people: Option<Arc<dyn BasePeopleDirectory>>,
    pub ranker: Arc<dyn FounderRanker>,
    pub poll_policy: PollPolicy,
    pub founder_limit: usize,
}

impl ServerDeps {
    /// Build real provider clients for every credential present in `config`.
    pub fn from_config(config: &Config) -> Self {
        let ai: Option<Arc<dyn BaseAI>> = config.openai_api_key.as_ref().map(|key| {
            let mut client = OpenAIClient::new(key.clone());
            if let Some(url) = &config.openai_base_url {
                client = client.with_base_url(url.clone());
            }
            Arc::new(OpenAIAdapter::new(client, config.openai_model.clone())) as Arc<dyn BaseAI>
        });

        let scraper: Option<Arc<dyn BaseProfileScraper>> =
            config.brightdata_credentials().map(|(key, dataset)| {
                let mut client = BrightDataClient::new(key, dataset);
                if let Some(url) = &config.brightdata_base_url {
                    client = client.with_base_url(url.clone());
                }
                Arc::new(client) as Arc<dyn BaseProfileScraper>
            });

        let people: Option<Arc<dyn BasePeopleDirectory>> =
            config.specter_api_key.as_ref().map(|key| {
                let mut client = SpecterClient::new(key.clone());
                if let Some(url) = &config.specter_base_url {
                    client = client.with_base_url(url.clone());
                }
                Arc::new(client) as Arc<dyn BasePeopleDirectory>
            });

        let ranker: Arc<dyn FounderRanker> = match &ai {
            Some(ai) => Arc::new(LlmRanker::new(ai.clone())),
            None => {
                tracing::info!("OPENAI_API_KEY not set, ranking founders by title heuristic");
                Arc::new(SeniorityRanker)
            }
        };

        for (name, configured) in [
            ("openai", ai.is_some()),
            ("brightdata", scraper.is_some()),
            ("specter", people.is_some()),
        ] {
            if !configured {
                tracing::warn!(provider = name, "Provider credentials not configured");
            }
        }

        Self {
            ai,
            scraper,
            people,
            ranker,
            poll_policy: PollPolicy::new(config.poll_interval, config.poll_max_wait),
            founder_limit: config.founder_limit,
        }
    }

    pub fn ai(&self) -> Result<&Arc<dyn BaseAI>, AppError> {
        self.ai
            .as_ref()
            .ok_or(AppError::ConfigurationMissing("OPENAI_API_KEY"))
    }

    pub fn scraper(&self) -> Result<&Arc<dyn BaseProfileScraper>, AppError> {
        self.scraper
            .as_ref()
            .ok_or(AppError::ConfigurationMissing("BRIGHTDATA_API_KEY/BRIGHTDATA_DATASET_ID"))
    }

    pub fn people(&self) -> Result<&Arc<dyn BasePeopleDirectory>, AppError> {
        self.people
            .as_ref()
            .ok_or(AppError::ConfigurationMissing("SPECTER_API_KEY"))
    }
}
