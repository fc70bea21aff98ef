//! Multipart helpers for the upload handler

use axum::extract::Multipart;
use visualbrief_core::AppError;
use visualbrief_processing::CandidateFile;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Collect every file part of a multipart form, in the order the client sent them.
///
/// Fields without a file name are ignored. Size and type checks are left to the
/// upload collector so rejected files are reported per file rather than failing
/// the whole request.
pub async fn extract_candidate_files(
    mut multipart: Multipart,
) -> Result<Vec<CandidateFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        files.push(CandidateFile::new(filename, content_type, data));
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    Ok(files)
}
