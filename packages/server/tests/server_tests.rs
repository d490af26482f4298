//! Integration tests for routing and middleware shared by every endpoint.

mod common;

use crate::common::TestHarness;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tgn_core::kernel::test_dependencies::{MockAI, MockPeopleDirectory};
use tgn_core::kernel::TestDependencies;

#[tokio::test]
async fn health_reports_configured_providers() {
    let ctx = TestHarness::new(
        TestDependencies::new()
            .mock_ai(MockAI::new())
            .mock_people(MockPeopleDirectory::new()),
    );

    let response = ctx.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "status": "ok",
            "providers": {"openai": true, "specter": true, "brightdata": false}
        })
    );
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let ctx = TestHarness::new(TestDependencies::new());

    let response = ctx.get("/api/nothing-here").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Not Found");
}

#[tokio::test]
async fn wrong_method_is_json_method_not_allowed() {
    let ctx = TestHarness::new(TestDependencies::new());

    for (method, uri) in [
        (Method::POST, "/api/specter"),
        (Method::DELETE, "/api/people"),
        (Method::PUT, "/api/linkedin-results"),
        (Method::GET, "/api/linkedin-profiles/sync"),
    ] {
        let response = ctx.request(method, uri).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(response.json(), json!({"error": "Method Not Allowed"}));
    }
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_by_default() {
    let ctx = TestHarness::new(TestDependencies::new());

    let response = ctx
        .send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/specter")
                .header("origin", "https://screening.example")
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}
