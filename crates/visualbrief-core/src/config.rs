//! Configuration module
//!
//! Configuration is read from the process environment (after loading an optional
//! `.env` file). API credentials are optional at load time: a missing key only
//! fails when the first analysis is attempted.

use std::env;
use std::str::FromStr;

use crate::constants;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANALYSIS_MAX_TOKENS: u32 = 4096;
const ANALYSIS_TIMEOUT_SECS: u64 = 120;

/// Which external service produces the brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisProviderKind {
    #[default]
    Gemini,
    Anthropic,
}

impl AnalysisProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisProviderKind::Gemini => "gemini",
            AnalysisProviderKind::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            AnalysisProviderKind::Gemini => "GEMINI_API_KEY",
            AnalysisProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl FromStr for AnalysisProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(AnalysisProviderKind::Gemini),
            "anthropic" | "claude" => Ok(AnalysisProviderKind::Anthropic),
            other => Err(anyhow::anyhow!(
                "ANALYSIS_PROVIDER must be 'gemini' or 'anthropic', got '{}'",
                other
            )),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    // Analysis service
    pub analysis_provider: AnalysisProviderKind,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_api_base: String,
    pub analysis_max_tokens: u32,
    pub analysis_timeout_secs: u64,
    // Upload limits and normalization
    pub max_images: usize,
    pub max_file_size_bytes: usize,
    pub max_image_dimension: u32,
    pub jpeg_quality: u8,
    // Cosmetic progress indicator
    pub progress_step_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server_port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            analysis_provider: AnalysisProviderKind::Gemini,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            anthropic_api_key: None,
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            anthropic_api_base: DEFAULT_ANTHROPIC_API_BASE.to_string(),
            analysis_max_tokens: ANALYSIS_MAX_TOKENS,
            analysis_timeout_secs: ANALYSIS_TIMEOUT_SECS,
            max_images: constants::MAX_IMAGES,
            max_file_size_bytes: constants::MAX_FILE_SIZE_BYTES,
            max_image_dimension: constants::MAX_IMAGE_DIMENSION,
            jpeg_quality: constants::JPEG_QUALITY,
            progress_step_interval_ms: constants::PROGRESS_STEP_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let analysis_provider = match env::var("ANALYSIS_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.analysis_provider,
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| constants::MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(constants::MAX_FILE_SIZE_MB);

        let config = Config {
            environment,
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            analysis_provider,
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: env::var("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
            anthropic_model: env::var("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            anthropic_api_base: env::var("ANTHROPIC_API_BASE")
                .unwrap_or(defaults.anthropic_api_base),
            analysis_max_tokens: env::var("ANALYSIS_MAX_TOKENS")
                .unwrap_or_else(|_| ANALYSIS_MAX_TOKENS.to_string())
                .parse()
                .unwrap_or(ANALYSIS_MAX_TOKENS),
            analysis_timeout_secs: env::var("ANALYSIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| ANALYSIS_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(ANALYSIS_TIMEOUT_SECS),
            max_images: env::var("MAX_IMAGES")
                .unwrap_or_else(|_| constants::MAX_IMAGES.to_string())
                .parse()
                .unwrap_or(constants::MAX_IMAGES),
            max_file_size_bytes: mebibytes_to_bytes(max_file_size_mb)?,
            max_image_dimension: env::var("MAX_IMAGE_DIMENSION")
                .unwrap_or_else(|_| constants::MAX_IMAGE_DIMENSION.to_string())
                .parse()
                .unwrap_or(constants::MAX_IMAGE_DIMENSION),
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| constants::JPEG_QUALITY.to_string())
                .parse()
                .unwrap_or(constants::JPEG_QUALITY),
            progress_step_interval_ms: env::var("PROGRESS_STEP_INTERVAL_MS")
                .unwrap_or_else(|_| constants::PROGRESS_STEP_INTERVAL_MS.to_string())
                .parse()
                .unwrap_or(constants::PROGRESS_STEP_INTERVAL_MS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must list at least one origin"));
        }

        if self.max_images == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGES must be at least 1"));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be at least 1"));
        }

        if self.max_image_dimension == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_DIMENSION must be at least 1"));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!("JPEG_QUALITY must be between 1 and 100"));
        }

        if self.progress_step_interval_ms == 0 {
            return Err(anyhow::anyhow!(
                "PROGRESS_STEP_INTERVAL_MS must be greater than 0"
            ));
        }

        Ok(())
    }

    /// Credential for the configured provider, if present.
    pub fn analysis_api_key(&self) -> Option<&str> {
        match self.analysis_provider {
            AnalysisProviderKind::Gemini => self.gemini_api_key.as_deref(),
            AnalysisProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }
}

fn mebibytes_to_bytes(mb: usize) -> Result<usize, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", mb))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_images, 3);
        assert_eq!(config.max_file_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.max_image_dimension, 1024);
        assert_eq!(config.jpeg_quality, 85);
        assert!(!config.is_production());
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let config = Config {
            jpeg_quality: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            jpeg_quality: 101,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = Config {
            max_images: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mebibytes_to_bytes() {
        assert_eq!(mebibytes_to_bytes(5).unwrap(), 5 * 1024 * 1024);
        assert_eq!(mebibytes_to_bytes(0).unwrap(), 0);

        let err = mebibytes_to_bytes(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE_MB is too large"));
        assert!(mebibytes_to_bytes(usize::MAX / (1024 * 1024) + 1).is_err());
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!(
            "Gemini".parse::<AnalysisProviderKind>().unwrap(),
            AnalysisProviderKind::Gemini
        );
        assert_eq!(
            "claude".parse::<AnalysisProviderKind>().unwrap(),
            AnalysisProviderKind::Anthropic
        );
        assert!("openai".parse::<AnalysisProviderKind>().is_err());
    }

    #[test]
    fn test_analysis_api_key_follows_provider() {
        let config = Config {
            gemini_api_key: Some("g-key".to_string()),
            anthropic_api_key: Some("a-key".to_string()),
            ..Config::default()
        };
        assert_eq!(config.analysis_api_key(), Some("g-key"));

        let config = Config {
            analysis_provider: AnalysisProviderKind::Anthropic,
            ..config
        };
        assert_eq!(config.analysis_api_key(), Some("a-key"));
        assert_eq!(config.analysis_provider.api_key_var(), "ANTHROPIC_API_KEY");
    }
}
