// TestDependencies - mock implementations for testing
//
// Provides mock providers that can be injected into ServerDeps for tests.
// Every mock records its calls so tests can assert on what reached "upstream".

use async_trait::async_trait;
use brightdata_client::{
    BrightDataError, JobHandle, JobStatus, PollPolicy, SnapshotSource,
};
use openai_client::OpenAIError;
use serde_json::Value;
use specter_client::{PersonSummary, SpecterError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseAI, BasePeopleDirectory, BaseProfileScraper, ServerDeps};
use crate::domains::people::ranking::{FounderRanker, SeniorityRanker};

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a completion call
#[derive(Debug, Clone)]
pub struct CompletionCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

pub struct MockAI {
    responses: Arc<Mutex<VecDeque<Result<String, OpenAIError>>>>,
    calls: Arc<Mutex<Vec<CompletionCall>>>,
    delay: Option<Duration>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep this long before answering (use with a paused clock)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_response(self, response: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    pub fn with_error(self, error: OpenAIError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> openai_client::Result<String> {
        self.calls.lock().unwrap().push(CompletionCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock AI response".to_string()))
    }
}

// =============================================================================
// Mock Profile Scraper
// =============================================================================

pub struct MockProfileScraper {
    handle: JobHandle,
    trigger_error: Mutex<Option<BrightDataError>>,
    poll_script: Mutex<VecDeque<Result<JobStatus, BrightDataError>>>,
    poll_fallback: JobStatus,
    known_handles: Vec<JobHandle>,
    trigger_calls: Mutex<Vec<Vec<String>>>,
    poll_calls: Mutex<Vec<JobHandle>>,
}

impl MockProfileScraper {
    /// Triggers succeed with `handle`; polls stay pending until scripted.
    pub fn new(handle: &str) -> Self {
        Self {
            handle: JobHandle::new(handle),
            trigger_error: Mutex::new(None),
            poll_script: Mutex::new(VecDeque::new()),
            poll_fallback: JobStatus::Pending,
            known_handles: vec![JobHandle::new(handle)],
            trigger_calls: Mutex::new(Vec::new()),
            poll_calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next trigger call with `error`.
    pub fn with_trigger_error(self, error: BrightDataError) -> Self {
        *self.trigger_error.lock().unwrap() = Some(error);
        self
    }

    /// Queue one poll result.
    pub fn with_poll(self, status: Result<JobStatus, BrightDataError>) -> Self {
        self.poll_script.lock().unwrap().push_back(status);
        self
    }

    /// Result once the script runs out.
    pub fn with_poll_fallback(mut self, status: JobStatus) -> Self {
        self.poll_fallback = status;
        self
    }

    pub fn trigger_calls(&self) -> Vec<Vec<String>> {
        self.trigger_calls.lock().unwrap().clone()
    }

    pub fn poll_calls(&self) -> Vec<JobHandle> {
        self.poll_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotSource for MockProfileScraper {
    async fn poll(&self, handle: &JobHandle) -> brightdata_client::Result<JobStatus> {
        self.poll_calls.lock().unwrap().push(handle.clone());

        // Unknown snapshots behave like the real API: 404
        if !self.known_handles.contains(handle) {
            return Err(BrightDataError::Rejected {
                status: 404,
                body: "Snapshot does not exist".to_string(),
            });
        }

        self.poll_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.poll_fallback.clone()))
    }
}

#[async_trait]
impl BaseProfileScraper for MockProfileScraper {
    async fn trigger(&self, items: &[String]) -> brightdata_client::Result<JobHandle> {
        self.trigger_calls.lock().unwrap().push(items.to_vec());

        let error = self.trigger_error.lock().unwrap().take();
        match error {
            Some(e) => Err(e),
            None => Ok(self.handle.clone()),
        }
    }
}

// =============================================================================
// Mock People Directory
// =============================================================================

pub struct MockPeopleDirectory {
    companies: HashMap<String, Value>,
    founders: HashMap<String, Vec<PersonSummary>>,
    people: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockPeopleDirectory {
    pub fn new() -> Self {
        Self {
            companies: HashMap::new(),
            founders: HashMap::new(),
            people: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_company(mut self, company_id: &str, company: Value) -> Self {
        self.companies.insert(company_id.to_string(), company);
        self
    }

    pub fn with_founders(mut self, company_id: &str, founders: Vec<PersonSummary>) -> Self {
        self.founders.insert(company_id.to_string(), founders);
        self
    }

    /// Person ids without a record here answer 404.
    pub fn with_person(mut self, person_id: &str, person: Value) -> Self {
        self.people.insert(person_id.to_string(), person);
        self
    }

    /// Every lookup made, as "company:<id>", "founders:<id>" or "person:<id>".
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn not_found(what: &str) -> SpecterError {
        SpecterError::Rejected {
            status: 404,
            body: format!("{what} not found"),
        }
    }
}

impl Default for MockPeopleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePeopleDirectory for MockPeopleDirectory {
    async fn company(&self, company_id: &str) -> specter_client::Result<Value> {
        self.calls.lock().unwrap().push(format!("company:{company_id}"));
        self.companies
            .get(company_id)
            .cloned()
            .ok_or_else(|| Self::not_found("company"))
    }

    async fn founders(&self, company_id: &str) -> specter_client::Result<Vec<PersonSummary>> {
        self.calls.lock().unwrap().push(format!("founders:{company_id}"));
        self.founders
            .get(company_id)
            .cloned()
            .ok_or_else(|| Self::not_found("company"))
    }

    async fn person(&self, person_id: &str) -> specter_client::Result<Value> {
        self.calls.lock().unwrap().push(format!("person:{person_id}"));
        self.people
            .get(person_id)
            .cloned()
            .ok_or_else(|| Self::not_found("person"))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for a `ServerDeps` wired to mocks. Providers left unset are
/// treated as unconfigured.
pub struct TestDependencies {
    pub ai: Option<Arc<MockAI>>,
    pub scraper: Option<Arc<MockProfileScraper>>,
    pub people: Option<Arc<MockPeopleDirectory>>,
    pub ranker: Arc<dyn FounderRanker>,
    pub poll_policy: PollPolicy,
    pub founder_limit: usize,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: None,
            scraper: None,
            people: None,
            ranker: Arc::new(SeniorityRanker),
            poll_policy: PollPolicy::new(Duration::from_millis(1), Duration::from_millis(20)),
            founder_limit: 3,
        }
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    pub fn mock_scraper(mut self, scraper: MockProfileScraper) -> Self {
        self.scraper = Some(Arc::new(scraper));
        self
    }

    pub fn mock_people(mut self, people: MockPeopleDirectory) -> Self {
        self.people = Some(Arc::new(people));
        self
    }

    pub fn ranker(mut self, ranker: Arc<dyn FounderRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps {
            ai: self.ai.clone().map(|ai| ai as Arc<dyn BaseAI>),
            scraper: self
                .scraper
                .clone()
                .map(|scraper| scraper as Arc<dyn BaseProfileScraper>),
            people: self
                .people
                .clone()
                .map(|people| people as Arc<dyn BasePeopleDirectory>),
            ranker: self.ranker.clone(),
            poll_policy: self.poll_policy,
            founder_limit: self.founder_limit,
        }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
