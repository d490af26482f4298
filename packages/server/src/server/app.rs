//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    BoxError, Router,
};
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::common::AppError;
use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    collect_profiles_handler, company_handler, founders_handler, generate_tgn_handler,
    health_handler, person_handler, profile_results_handler, start_profiles_handler,
};

/// Headroom on top of the slowest upstream chain for our own work
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(15);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, config: &Config) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    Router::new()
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .route(
            "/api/linkedin-profiles",
            post(start_profiles_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/linkedin-profiles/sync",
            post(collect_profiles_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/linkedin-results",
            get(profile_results_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/generate-tgn",
            post(generate_tgn_handler).fallback(method_not_allowed),
        )
        .route("/api/specter", get(company_handler).fallback(method_not_allowed))
        .route("/api/people", get(founders_handler).fallback(method_not_allowed))
        .route(
            "/api/person-details",
            get(person_handler).fallback(method_not_allowed),
        )
        .fallback(not_found)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_budget(config))),
        )
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Longest a request may run before the router answers 408 itself.
///
/// Must outlast every upstream chain so that routes report their own errors:
/// a completion bounded by the OpenAI client timeout, and the synchronous
/// scrape (trigger, the wait budget, one more sleep and a final poll).
pub fn request_budget(config: &Config) -> Duration {
    let scrape = brightdata_client::REQUEST_TIMEOUT
        + config.poll_max_wait
        + config.poll_interval
        + brightdata_client::REQUEST_TIMEOUT;
    scrape.max(openai_client::REQUEST_TIMEOUT) + REQUEST_TIMEOUT_MARGIN
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout("the request to complete")
    } else {
        AppError::Internal(err.to_string())
    }
}

/// Any origin when none are configured.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound
}
