use visualbrief_core::constants::ANALYSIS_FAILED_MESSAGE;
use visualbrief_core::AppError;

/// Everything that can go wrong while producing a brief.
///
/// The display text is diagnostic. Users only ever see
/// [`AnalysisError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No images provided")]
    NoImages,

    #[error("Unsupported image type at position {index}: {mime_type}")]
    UnsupportedMediaType { index: usize, mime_type: String },

    #[error("{provider} API key not configured (set {env_var})")]
    NotConfigured {
        provider: &'static str,
        env_var: &'static str,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request to {provider} API failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} API request failed: {status} - {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("No response generated")]
    EmptyResponse,

    #[error("Failed to parse analysis result: {0}")]
    Parse(String),
}

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }

    pub fn is_not_configured(&self) -> bool {
        matches!(self, AnalysisError::NotConfigured { .. })
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NoImages | AnalysisError::UnsupportedMediaType { .. } => {
                AppError::InvalidInput(err.to_string())
            }
            AnalysisError::NotConfigured { .. } => AppError::Configuration(err.to_string()),
            other => AppError::AnalysisFailed(other.to_string()),
        }
    }
}
