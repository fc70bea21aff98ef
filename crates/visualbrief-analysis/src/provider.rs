//! Analysis provider abstraction
//!
//! Keeps the wire details of each model vendor out of the brief client.

use async_trait::async_trait;
use std::fmt::Debug;
use visualbrief_core::ImagePayload;

use crate::error::AnalysisError;

/// A multimodal model that answers the brief prompt for a set of images.
///
/// Implementations send the images in order together with the fixed prompt and
/// return the model's raw textual answer. Parsing is the caller's job.
#[async_trait]
pub trait AnalysisProvider: Send + Sync + Debug {
    /// Short provider name used in logs and errors (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Request an analysis and return the answer text
    async fn generate(&self, images: &[ImagePayload]) -> Result<String, AnalysisError>;
}
