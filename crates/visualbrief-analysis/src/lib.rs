//! VisualBrief Analysis Library
//!
//! Sends normalized images to a multimodal model and turns its answer into a
//! [`CreativeBrief`](visualbrief_core::CreativeBrief).
//!
//! The model is reached through an [`AnalysisProvider`]. Two providers ship with
//! the crate: Gemini (the default) and Anthropic. The provider is built lazily by
//! [`AnalysisContext`] on first use, so a missing credential only fails the
//! requests that need it.

pub mod client;
pub mod context;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use client::{parse_brief, BriefClient};
pub use context::AnalysisContext;
pub use error::AnalysisError;
pub use provider::AnalysisProvider;
pub use providers::{AnthropicProvider, GeminiProvider};
