//! Specter company and people lookups.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::AppError;
use crate::domains::people::{company_profile, founders_with_details, person_details};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleQuery {
    #[serde(alias = "company_id")]
    pub company_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonQuery {
    #[serde(alias = "person_id")]
    pub person_id: Option<String>,
}

/// GET /api/specter?id=
pub async fn company_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<CompanyQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let company = company_profile(&state.deps, query.id.as_deref().unwrap_or_default()).await?;
    Ok(Json(company))
}

/// GET /api/people?companyId=
pub async fn founders_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<PeopleQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, AppError> {
    let Query(query) = query?;
    let founders =
        founders_with_details(&state.deps, query.company_id.as_deref().unwrap_or_default())
            .await?;
    Ok(Json(founders))
}

/// GET /api/person-details?personId=
pub async fn person_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<PersonQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let person = person_details(&state.deps, query.person_id.as_deref().unwrap_or_default()).await?;
    Ok(Json(person))
}
