//! Anthropic Messages API provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use visualbrief_core::{Config, ImagePayload};

use super::{build_http_client, check_status};
use crate::error::AnalysisError;
use crate::prompt::{prompt_with_shape, SYSTEM_INSTRUCTION};
use crate::provider::AnalysisProvider;

const PROVIDER: &str = "anthropic";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    max_tokens: u32,
}

impl Debug for AnthropicProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnthropicProvider")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

// Messages API request/response structures
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
struct MessageParam {
    role: String,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlockResponse>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlockResponse {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl AnthropicProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            http_client: build_http_client(timeout_secs)?,
            api_key: api_key.into(),
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            max_tokens,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let api_key = config
            .anthropic_api_key
            .clone()
            .ok_or(AnalysisError::NotConfigured {
                provider: PROVIDER,
                env_var: "ANTHROPIC_API_KEY",
            })?;

        Self::new(
            api_key,
            config.anthropic_model.clone(),
            config.anthropic_api_base.clone(),
            config.analysis_max_tokens,
            config.analysis_timeout_secs,
        )
    }

    fn build_request(&self, images: &[ImagePayload]) -> MessagesRequest {
        let mut content: Vec<ContentBlock> = images
            .iter()
            .map(|img| ContentBlock::Image {
                source: ImageSource {
                    source_type: "base64".to_string(),
                    media_type: img.mime_type.clone(),
                    data: img.base64_data.clone(),
                },
            })
            .collect();
        content.push(ContentBlock::Text {
            text: prompt_with_shape(),
        });

        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: SYSTEM_INSTRUCTION.to_string(),
            messages: vec![MessageParam {
                role: "user".to_string(),
                content,
            }],
        }
    }
}

#[async_trait]
impl AnalysisProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, images: &[ImagePayload]) -> Result<String, AnalysisError> {
        let body = self.build_request(images);

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let response = check_status(PROVIDER, response).await?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(format!("Invalid Anthropic response: {}", e)))?;

        if let Some(usage) = &parsed.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Anthropic usage"
            );
        }

        parsed
            .content
            .into_iter()
            .find_map(|b| match b {
                ContentBlockResponse::Text { text } if !text.trim().is_empty() => Some(text),
                _ => None,
            })
            .ok_or(AnalysisError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image() -> ImagePayload {
        ImagePayload {
            base64_data: "AAAA".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn test_request_shape() {
        let provider =
            AnthropicProvider::new("key", "claude-sonnet-4-20250514", "http://localhost", 4096, 5)
                .unwrap();
        let value = serde_json::to_value(provider.build_request(&[image()])).unwrap();

        assert_eq!(value["max_tokens"], 4096);
        assert!(value["system"].as_str().unwrap().contains("Brand Strategist"));
        let content = value["messages"][0]["content"].as_array().unwrap();
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/jpeg");
        assert_eq!(content[1]["type"], "text");
        assert!(content[1]["text"].as_str().unwrap().contains("visualStyle"));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = Config::default();
        let err = AnthropicProvider::from_config(&config).unwrap_err();
        assert!(err.is_not_configured());
    }

    #[tokio::test]
    async fn test_generate_returns_first_text_block() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", API_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "content": [{ "type": "text", "text": "{\"ok\": true}" }],
                    "usage": { "input_tokens": 10, "output_tokens": 5 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = AnthropicProvider::new(
            "test-key",
            "claude-sonnet-4-20250514",
            server.url(),
            4096,
            5,
        )
        .unwrap();
        let text = provider.generate(&[image()]).await.unwrap();

        assert_eq!(text, "{\"ok\": true}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        // Nothing listens on port 9 (discard) on the test host.
        let provider =
            AnthropicProvider::new("key", "claude", "http://127.0.0.1:9", 4096, 2).unwrap();
        let err = provider.generate(&[image()]).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { .. }));
    }
}
