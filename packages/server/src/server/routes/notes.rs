use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    Json,
};
use chrono::Local;

use crate::common::AppError;
use crate::domains::screening::{generate_note, NoteRequest};
use crate::server::app::AppState;

/// POST /api/generate-tgn
///
/// Returns the note as plain text.
pub async fn generate_tgn_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body?;
    let note = generate_note(&state.deps, request, Local::now().date_naive()).await?;

    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], note))
}
