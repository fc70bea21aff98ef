//! VisualBrief Media Processing Library
//!
//! This crate turns uploaded files into analysis-ready assets: validation of the
//! declared size and type, normalization of the pixels to a bounded JPEG, and
//! the ordered collection that holds the session's assets.

pub mod image;
pub mod upload;
pub mod validator;

// Re-export commonly used types
pub use image::{ImageNormalizer, ImageResize, NormalizeError, NormalizedImage};
pub use upload::{CandidateFile, UploadCollector, UploadError};
pub use validator::{MediaValidator, ValidationError};
