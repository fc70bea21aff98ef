//! Lazily-initialized analysis provider.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use tokio::sync::OnceCell;
use visualbrief_core::{AnalysisProviderKind, Config};

use crate::error::AnalysisError;
use crate::provider::AnalysisProvider;
use crate::providers::{AnthropicProvider, GeminiProvider};

/// Holds the configuration and the provider built from it on first use.
///
/// A missing credential is not cached: every call reports
/// [`AnalysisError::NotConfigured`] until the process is restarted with a key.
pub struct AnalysisContext {
    config: Config,
    provider: OnceCell<Arc<dyn AnalysisProvider>>,
}

impl Debug for AnalysisContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnalysisContext")
            .field("provider_kind", &self.config.analysis_provider.as_str())
            .field("initialized", &self.provider.initialized())
            .finish()
    }
}

impl AnalysisContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            provider: OnceCell::new(),
        }
    }

    /// Context with a ready provider (used by tests and embedders).
    pub fn with_provider(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            config: Config::default(),
            provider: OnceCell::new_with(Some(provider)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn provider(&self) -> Result<Arc<dyn AnalysisProvider>, AnalysisError> {
        self.provider
            .get_or_try_init(|| async { build_provider(&self.config) })
            .await
            .cloned()
    }
}

/// Build the provider selected by `ANALYSIS_PROVIDER`.
pub fn build_provider(config: &Config) -> Result<Arc<dyn AnalysisProvider>, AnalysisError> {
    let provider: Arc<dyn AnalysisProvider> = match config.analysis_provider {
        AnalysisProviderKind::Gemini => Arc::new(GeminiProvider::from_config(config)?),
        AnalysisProviderKind::Anthropic => Arc::new(AnthropicProvider::from_config(config)?),
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        "Analysis provider initialized"
    );
    Ok(provider)
}
