//! Concrete analysis providers.

mod anthropic;
mod gemini;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;

use std::time::Duration;

use crate::error::AnalysisError;

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, AnalysisError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AnalysisError::Client(e.to_string()))
}

/// Turn a non-success response into [`AnalysisError::Status`].
async fn check_status(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AnalysisError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    tracing::warn!(provider, status = status.as_u16(), "Analysis API returned an error");
    Err(AnalysisError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}
