//! Stateless analysis endpoint.

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use visualbrief_core::ImagePayload;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

/// Analyze already-encoded images and return the brief as JSON.
#[tracing::instrument(skip_all, fields(operation = "analyze_images"))]
pub async fn analyze_images(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let brief = state.client.analyze_payloads(&request.images).await?;
    Ok(Json(brief))
}
