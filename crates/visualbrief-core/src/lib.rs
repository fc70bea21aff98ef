//! VisualBrief Core Library
//!
//! This crate provides the domain models, error types, configuration and limits
//! shared by every VisualBrief component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{AnalysisProviderKind, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AnalysisState, BrandVoice, BriefMeta, BriefSections, BriefStats, ColorPalette, CreativeBrief,
    ImagePayload, Messaging, Recommendations, TargetAudience, Typography, UploadedAsset,
    VisualStyle,
};
