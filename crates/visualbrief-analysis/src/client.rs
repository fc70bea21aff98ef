//! Brief request client: images in, validated [`CreativeBrief`] out.

use chrono::Utc;
use std::sync::Arc;
use visualbrief_core::constants::ALLOWED_CONTENT_TYPES;
use visualbrief_core::{BriefSections, Config, CreativeBrief, ImagePayload, UploadedAsset};

use crate::context::AnalysisContext;
use crate::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct BriefClient {
    context: Arc<AnalysisContext>,
}

impl BriefClient {
    pub fn new(context: Arc<AnalysisContext>) -> Self {
        Self { context }
    }

    pub fn from_config(config: Config) -> Self {
        Self::new(Arc::new(AnalysisContext::new(config)))
    }

    pub fn context(&self) -> &AnalysisContext {
        &self.context
    }

    /// Analyze the session's normalized assets, in order.
    pub async fn analyze(&self, assets: &[UploadedAsset]) -> Result<CreativeBrief, AnalysisError> {
        let payloads: Vec<ImagePayload> = assets.iter().map(UploadedAsset::payload).collect();
        self.analyze_payloads(&payloads).await
    }

    pub async fn analyze_payloads(
        &self,
        images: &[ImagePayload],
    ) -> Result<CreativeBrief, AnalysisError> {
        // A missing credential is reported before anything about the request.
        let provider = self.context.provider().await?;

        if images.is_empty() {
            return Err(AnalysisError::NoImages);
        }
        check_media_types(images)?;

        tracing::info!(
            provider = provider.name(),
            model = provider.model(),
            image_count = images.len(),
            "Requesting creative brief"
        );

        let text = provider.generate(images).await.map_err(|e| {
            tracing::warn!(provider = provider.name(), error = %e, "Brief analysis failed");
            e
        })?;

        let sections = parse_brief(&text)?;
        let brief = CreativeBrief::new(sections, Utc::now(), images.len());

        tracing::info!(
            image_count = brief.meta.image_count,
            "Creative brief generated"
        );
        Ok(brief)
    }
}

fn check_media_types(images: &[ImagePayload]) -> Result<(), AnalysisError> {
    for (index, image) in images.iter().enumerate() {
        let mime_type = image.mime_type.trim().to_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&mime_type.as_str()) {
            return Err(AnalysisError::UnsupportedMediaType {
                index,
                mime_type: image.mime_type.clone(),
            });
        }
    }
    Ok(())
}

/// Strip a surrounding Markdown code fence, if any.
fn extract_json(text: &str) -> &str {
    if text.contains("```json") {
        text.split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else if text.contains("```") {
        text.split("```")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(text)
            .trim()
    } else {
        text.trim()
    }
}

/// Parse and validate a model answer.
///
/// Every section and scalar field must be present; absent lists are empty.
/// Any `meta` in the answer is ignored.
pub fn parse_brief(text: &str) -> Result<BriefSections, AnalysisError> {
    let json_text = extract_json(text);
    if json_text.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    serde_json::from_str(json_text).map_err(|e| AnalysisError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::AnalysisProvider;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    fn brief_json() -> serde_json::Value {
        json!({
            "visualStyle": {
                "colorPalette": { "primary": "#0B1F3A", "secondary": ["#F2F2F2"], "accent": "#FFB400" },
                "typography": { "style": "Modern Sans-Serif", "hierarchy": "Bold headlines, light body" },
                "layoutPatterns": ["Centered hero"],
                "visualMotifs": ["Gradients"]
            },
            "brandVoice": { "tone": "Confident", "personality": ["Bold", "Warm"], "emotionalAppeal": "Aspiration" },
            "messaging": { "keyThemes": ["Speed"], "callToActionStyle": "Direct", "valueProposition": "Ship faster" },
            "targetAudience": { "inferredDemographic": "Founders 25-40", "psychographics": ["Ambitious"] },
            "recommendations": { "doThis": ["Use bold type"], "avoidThis": ["Clutter"], "contentIdeas": ["Case studies"] },
            "meta": { "analyzedAt": "1999-01-01T00:00:00Z", "imageCount": 99 }
        })
    }

    #[derive(Debug)]
    struct FakeProvider {
        answer: Result<String, ()>,
        seen: Mutex<Vec<usize>>,
    }

    impl FakeProvider {
        fn answering(text: String) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(text),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: Err(()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AnalysisProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn model(&self) -> &str {
            "fake-model"
        }

        async fn generate(&self, images: &[ImagePayload]) -> Result<String, AnalysisError> {
            self.seen.lock().unwrap().push(images.len());
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(AnalysisError::Status {
                    provider: "fake",
                    status: 401,
                    body: "unauthorized".to_string(),
                }),
            }
        }
    }

    fn payloads(n: usize) -> Vec<ImagePayload> {
        (0..n)
            .map(|_| ImagePayload {
                base64_data: "AAAA".to_string(),
                mime_type: "image/jpeg".to_string(),
            })
            .collect()
    }

    fn client(provider: Arc<FakeProvider>) -> BriefClient {
        BriefClient::new(Arc::new(AnalysisContext::with_provider(provider)))
    }

    #[tokio::test]
    async fn test_meta_is_stamped_by_client() {
        let provider = FakeProvider::answering(brief_json().to_string());
        let before = Utc::now();

        let brief = client(provider.clone())
            .analyze_payloads(&payloads(2))
            .await
            .unwrap();

        assert_eq!(brief.meta.image_count, 2);
        assert!(brief.meta.analyzed_at >= before);
        assert_eq!(brief.sections.brand_voice.tone, "Confident");
        assert_eq!(*provider.seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_analyze_assets_sends_payloads() {
        let provider = FakeProvider::answering(brief_json().to_string());
        let asset = UploadedAsset {
            id: uuid::Uuid::new_v4(),
            name: "a.jpg".to_string(),
            size_bytes: 10,
            declared_media_type: "image/jpeg".to_string(),
            data_url: "data:image/jpeg;base64,AAAA".to_string(),
            transport_payload: "AAAA".to_string(),
            media_type: "image/jpeg".to_string(),
            width: 1,
            height: 1,
        };

        let brief = client(provider).analyze(&[asset]).await.unwrap();
        assert_eq!(brief.meta.image_count, 1);
    }

    #[tokio::test]
    async fn test_no_images() {
        let provider = FakeProvider::answering(brief_json().to_string());
        let err = client(provider.clone())
            .analyze_payloads(&[])
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::NoImages));
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_media_type_is_rejected_before_the_provider() {
        let provider = FakeProvider::answering(brief_json().to_string());
        let mut images = payloads(2);
        images[1].mime_type = "image/gif".to_string();

        let err = client(provider.clone())
            .analyze_payloads(&images)
            .await
            .unwrap_err();

        match err {
            AnalysisError::UnsupportedMediaType { index, mime_type } => {
                assert_eq!(index, 1);
                assert_eq!(mime_type, "image/gif");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_media_type_check_ignores_case() {
        let provider = FakeProvider::answering(brief_json().to_string());
        let mut images = payloads(2);
        images[0].mime_type = "IMAGE/PNG".to_string();
        images[1].mime_type = "image/webp".to_string();

        let brief = client(provider).analyze_payloads(&images).await.unwrap();
        assert_eq!(brief.meta.image_count, 2);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let err = client(FakeProvider::failing())
            .analyze_payloads(&payloads(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_context() {
        let err = BriefClient::from_config(Config::default())
            .analyze_payloads(&payloads(1))
            .await
            .unwrap_err();
        assert!(err.is_not_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_context_wins_over_empty_request() {
        let err = BriefClient::from_config(Config::default())
            .analyze_payloads(&[])
            .await
            .unwrap_err();
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_parse_plain_json() {
        let sections = parse_brief(&brief_json().to_string()).unwrap();
        assert_eq!(sections.visual_style.color_palette.primary, "#0B1F3A");
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("Here is the brief:\n```json\n{}\n```\n", brief_json());
        let sections = parse_brief(&fenced).unwrap();
        assert_eq!(sections.messaging.value_proposition, "Ship faster");

        let bare_fence = format!("```\n{}\n```", brief_json());
        assert!(parse_brief(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_rejects_incomplete_answer() {
        let mut value = brief_json();
        value.as_object_mut().unwrap().remove("targetAudience");
        assert!(matches!(
            parse_brief(&value.to_string()),
            Err(AnalysisError::Parse(_))
        ));

        let mut value = brief_json();
        value["brandVoice"].as_object_mut().unwrap().remove("tone");
        assert!(parse_brief(&value.to_string()).is_err());
    }

    #[test]
    fn test_parse_defaults_missing_lists() {
        let mut value = brief_json();
        value["recommendations"]
            .as_object_mut()
            .unwrap()
            .remove("contentIdeas");
        let sections = parse_brief(&value.to_string()).unwrap();
        assert!(sections.recommendations.content_ideas.is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_brief("I could not analyze these images."),
            Err(AnalysisError::Parse(_))
        ));
        assert!(matches!(parse_brief("   "), Err(AnalysisError::EmptyResponse)));
    }
}
