// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Each one wraps a single upstream provider so domains can be tested with mocks.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BasePeopleDirectory)

use async_trait::async_trait;
use brightdata_client::{JobHandle, SnapshotSource};
use serde_json::Value;
use specter_client::PersonSummary;

// =============================================================================
// AI Trait (LLM completion)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a system + user prompt pair (returns raw text response)
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> openai_client::Result<String>;
}

// =============================================================================
// Profile Scraper Trait (asynchronous collection jobs)
// =============================================================================

/// Polling comes from the `SnapshotSource` supertrait so the bounded wait
/// loop in `brightdata_client` runs directly against any implementation.
#[async_trait]
pub trait BaseProfileScraper: SnapshotSource {
    /// Start a collection job. Not idempotent: every call is a new job.
    async fn trigger(&self, items: &[String]) -> brightdata_client::Result<JobHandle>;
}

// =============================================================================
// People Directory Trait (company / founder data)
// =============================================================================

#[async_trait]
pub trait BasePeopleDirectory: Send + Sync {
    async fn company(&self, company_id: &str) -> specter_client::Result<Value>;

    async fn founders(&self, company_id: &str) -> specter_client::Result<Vec<PersonSummary>>;

    async fn person(&self, person_id: &str) -> specter_client::Result<Value>;
}
