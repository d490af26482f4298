use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    providers: ProviderHealth,
}

/// Which upstream providers have credentials configured.
#[derive(Debug, Serialize)]
pub struct ProviderHealth {
    openai: bool,
    specter: bool,
    brightdata: bool,
}

/// Health check endpoint
///
/// Always 200 while the process is serving; unconfigured providers only
/// fail the routes that need them.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        providers: ProviderHealth {
            openai: state.deps.ai.is_some(),
            specter: state.deps.people.is_some(),
            brightdata: state.deps.scraper.is_some(),
        },
    })
}
