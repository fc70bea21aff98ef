//! Brief document export.

use crate::error::{HttpAppError, ValidatedJson};
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use visualbrief_core::constants::BRIEF_PDF_FILENAME;
use visualbrief_core::{AppError, CreativeBrief};

/// Render a brief supplied in the request body.
pub async fn brief_pdf(
    ValidatedJson(brief): ValidatedJson<CreativeBrief>,
) -> Result<Response, HttpAppError> {
    pdf_response(brief).await
}

/// Render on the blocking pool and wrap the bytes as a download.
pub(crate) async fn pdf_response(brief: CreativeBrief) -> Result<Response, HttpAppError> {
    let bytes = tokio::task::spawn_blocking(move || visualbrief_render::render_pdf(&brief))
        .await
        .map_err(|e| AppError::Internal(format!("Render task failed: {}", e)))??;

    tracing::debug!(size_bytes = bytes.len(), "Brief document rendered");

    let content_disposition = format!("attachment; filename=\"{}\"", BRIEF_PDF_FILENAME);

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
