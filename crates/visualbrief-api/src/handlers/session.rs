//! Handlers for the in-memory brief session.

use crate::error::HttpAppError;
use crate::handlers::brief::pdf_response;
use crate::state::AppState;
use crate::utils::upload::extract_candidate_files;
use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::PathRejection,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use visualbrief_core::{AppError, CreativeBrief};

const NO_BRIEF_MESSAGE: &str = "No brief available";

pub async fn get_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.snapshot().await)
}

/// Add a batch of files. Per-file rejections are reported in the snapshot's `error`.
#[tracing::instrument(skip_all, fields(operation = "upload_images"))]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let files = extract_candidate_files(multipart?).await?;
    tracing::debug!(file_count = files.len(), "Received upload batch");

    let snapshot = state.session.add_files(files).await?;
    Ok(Json(snapshot))
}

pub async fn remove_image(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(id) = path?;
    if !state.session.remove_asset(id).await {
        tracing::debug!(asset_id = %id, "Nothing removed");
    }
    Ok(Json(state.session.snapshot().await))
}

/// Start the analysis in the background; poll `GET /api/session` for progress.
pub async fn start_analysis(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let task = state.session.spawn_analysis().await?;
    drop(task);

    Ok((StatusCode::ACCEPTED, Json(state.session.snapshot().await)))
}

pub async fn cancel_analysis(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.cancel().await;
    Json(state.session.snapshot().await)
}

pub async fn reset_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.reset().await;
    Json(state.session.snapshot().await)
}

pub async fn get_brief(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreativeBrief>, HttpAppError> {
    let brief = current_brief(&state).await?;
    Ok(Json(brief))
}

pub async fn get_brief_pdf(State(state): State<Arc<AppState>>) -> Result<Response, HttpAppError> {
    let brief = current_brief(&state).await?;
    pdf_response(brief).await
}

async fn current_brief(state: &AppState) -> Result<CreativeBrief, HttpAppError> {
    state
        .session
        .brief()
        .await
        .map(|brief| brief.as_ref().clone())
        .ok_or_else(|| AppError::NotFound(NO_BRIEF_MESSAGE.to_string()).into())
}
