//! Integration tests for LinkedIn profile collection.
//!
//! Covers the trigger / poll pair and the synchronous variant:
//! - Input is validated before any upstream call
//! - Missing Bright Data credentials fail with 500, not a network call
//! - Poll results are normalized and unusable records dropped

mod common;

use crate::common::TestHarness;
use axum::http::StatusCode;
use brightdata_client::{BrightDataError, JobStatus};
use serde_json::json;
use tgn_core::kernel::test_dependencies::MockProfileScraper;
use tgn_core::kernel::TestDependencies;

fn harness(scraper: MockProfileScraper) -> TestHarness {
    TestHarness::new(TestDependencies::new().mock_scraper(scraper))
}

fn scraper(harness: &TestHarness) -> &MockProfileScraper {
    harness.deps.scraper.as_deref().unwrap()
}

// =============================================================================
// Trigger
// =============================================================================

#[tokio::test]
async fn trigger_returns_handle() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx
        .post_json(
            "/api/linkedin-profiles",
            json!({"items": ["https://linkedin.com/in/a", "https://linkedin.com/in/b"]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.json(), json!({"handle": "s_m1abc"}));
    assert_eq!(
        scraper(&ctx).trigger_calls(),
        vec![vec![
            "https://linkedin.com/in/a".to_string(),
            "https://linkedin.com/in/b".to_string()
        ]]
    );
}

#[tokio::test]
async fn trigger_accepts_urls_field() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx
        .post_json("/api/linkedin-profiles", json!({"urls": ["https://linkedin.com/in/a"]}))
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn empty_items_are_rejected_without_upstream_call() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    for body in [json!({"items": []}), json!({}), json!({"items": ["  "]})] {
        let response = ctx.post_json("/api/linkedin-profiles", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(!response.error().is_empty());
    }

    assert!(scraper(&ctx).trigger_calls().is_empty());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx
        .post_raw("/api/linkedin-profiles", "application/json", "{not json")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx
        .post_raw("/api/linkedin-profiles", "text/plain", "https://linkedin.com/in/a")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_credentials_are_a_server_error() {
    let ctx = TestHarness::new(TestDependencies::new());

    let response = ctx
        .post_json("/api/linkedin-profiles", json!({"items": ["https://linkedin.com/in/a"]}))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.error().contains("BRIGHTDATA_API_KEY"));
}

#[tokio::test]
async fn trigger_without_handle_is_bad_gateway() {
    let ctx = harness(
        MockProfileScraper::new("s_m1abc").with_trigger_error(BrightDataError::MissingHandle),
    );

    let response = ctx
        .post_json("/api/linkedin-profiles", json!({"items": ["https://linkedin.com/in/a"]}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error(), "Bright Data did not return a job handle");
}

#[tokio::test]
async fn trigger_rejection_hides_upstream_body() {
    let ctx = harness(MockProfileScraper::new("s_m1abc").with_trigger_error(
        BrightDataError::Rejected {
            status: 401,
            body: "invalid token bd-secret".into(),
        },
    ));

    let response = ctx
        .post_json("/api/linkedin-profiles", json!({"items": ["https://linkedin.com/in/a"]}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.error(), "Bright Data returned HTTP 401");
}

#[tokio::test]
async fn trigger_is_post_only() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx.get("/api/linkedin-profiles").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.error(), "Method Not Allowed");
}

// =============================================================================
// Poll
// =============================================================================

#[tokio::test]
async fn poll_reports_processing() {
    let ctx = harness(
        MockProfileScraper::new("s_m1abc")
            .with_poll(Ok(JobStatus::Pending))
            .with_poll(Ok(JobStatus::Empty)),
    );

    for _ in 0..2 {
        let response = ctx.get("/api/linkedin-results?handle=s_m1abc").await;
        assert_eq!(response.status, StatusCode::ACCEPTED);
        assert_eq!(response.json(), json!({"status": "processing"}));
    }
}

#[tokio::test]
async fn poll_normalizes_and_drops_empty_records() {
    let ctx = harness(MockProfileScraper::new("s_m1abc").with_poll(Ok(JobStatus::Ready(vec![
        json!({"name": "A", "position": "CEO"}),
        json!({}),
    ]))));

    let response = ctx.get("/api/linkedin-results?snapshot_id=s_m1abc").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "complete");

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "A");
    assert_eq!(data[0]["title"], "CEO");
    assert_eq!(data[0]["experience"], json!([]));
}

#[tokio::test]
async fn poll_unknown_handle_is_an_error() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx.get("/api/linkedin-results?handle=s_unknown").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.json().get("data").is_none());
}

#[tokio::test]
async fn poll_requires_handle() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx.get("/api/linkedin-results").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(scraper(&ctx).poll_calls().is_empty());
}

#[tokio::test]
async fn poll_failed_job_is_bad_gateway() {
    let ctx = harness(
        MockProfileScraper::new("s_m1abc")
            .with_poll(Err(BrightDataError::JobFailed("dataset error".into()))),
    );

    let response = ctx.get("/api/linkedin-results?handle=s_m1abc").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.error().contains("dataset error"));
}

// =============================================================================
// Synchronous collection
// =============================================================================

#[tokio::test]
async fn sync_collection_returns_profiles() {
    let ctx = harness(
        MockProfileScraper::new("s_m1abc")
            .with_poll(Ok(JobStatus::Pending))
            .with_poll(Ok(JobStatus::Ready(vec![json!({
                "name": "A",
                "input_url": "https://linkedin.com/in/a",
                "education": [{"title": "ETH Zurich"}]
            })]))),
    );

    let response = ctx
        .post_json(
            "/api/linkedin-profiles/sync",
            json!({"items": ["https://linkedin.com/in/a"]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let profiles = response.json();
    assert_eq!(profiles[0]["input_url"], "https://linkedin.com/in/a");
    assert_eq!(profiles[0]["title"], "N/A");
    assert_eq!(profiles[0]["education"][0]["school"], "ETH Zurich");
    assert_eq!(scraper(&ctx).poll_calls().len(), 2);
}

#[tokio::test]
async fn sync_collection_times_out() {
    let ctx = harness(MockProfileScraper::new("s_m1abc"));

    let response = ctx
        .post_json(
            "/api/linkedin-profiles/sync",
            json!({"items": ["https://linkedin.com/in/a"]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);
    assert!(response.error().starts_with("Timed out"));
}

#[tokio::test]
async fn sync_collection_with_no_records_is_empty_list() {
    let ctx = harness(MockProfileScraper::new("s_m1abc").with_poll_fallback(JobStatus::Empty));

    let response = ctx
        .post_json(
            "/api/linkedin-profiles/sync",
            json!({"items": ["https://linkedin.com/in/a"]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}
