//! LinkedIn profile collection through Bright Data.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    Json,
};
use brightdata_client::EnrichedProfile;
use serde::{Deserialize, Serialize};

use crate::common::AppError;
use crate::domains::enrichment::{
    check_profile_collection, collect_profiles, start_profile_collection, CollectionStatus,
};
use crate::server::app::AppState;

/// Profile URLs to collect. Older clients send them as `urls`.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilesRequest {
    #[serde(default, alias = "urls")]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct HandleResponse {
    pub handle: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    #[serde(alias = "snapshot_id")]
    pub handle: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultsResponse {
    Processing,
    Complete { data: Vec<EnrichedProfile> },
}

/// POST /api/linkedin-profiles
pub async fn start_profiles_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<ProfilesRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<HandleResponse>), AppError> {
    let Json(body) = body?;
    let handle = start_profile_collection(&state.deps, body.items.unwrap_or_default()).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(HandleResponse {
            handle: handle.into_inner(),
        }),
    ))
}

/// GET /api/linkedin-results?handle=
pub async fn profile_results_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<ResultsQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ResultsResponse>), AppError> {
    let Query(query) = query?;
    let handle = query.handle.unwrap_or_default();

    Ok(match check_profile_collection(&state.deps, &handle).await? {
        CollectionStatus::Processing => (StatusCode::ACCEPTED, Json(ResultsResponse::Processing)),
        CollectionStatus::Complete(data) => {
            (StatusCode::OK, Json(ResultsResponse::Complete { data }))
        }
    })
}

/// POST /api/linkedin-profiles/sync
///
/// Holds the request open for up to the poll budget.
pub async fn collect_profiles_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<ProfilesRequest>, JsonRejection>,
) -> Result<Json<Vec<EnrichedProfile>>, AppError> {
    let Json(body) = body?;
    let profiles = collect_profiles(&state.deps, body.items.unwrap_or_default()).await?;
    Ok(Json(profiles))
}
