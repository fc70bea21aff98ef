//! Image processing module
//!
//! This module provides the normalization applied to every upload:
//! - Bounded downscaling preserving aspect ratio (resize)
//! - Decode, flatten and JPEG re-encode into a transport payload (normalizer)

pub mod normalizer;
pub mod resize;

pub use normalizer::{ImageNormalizer, NormalizeError, NormalizedImage};
pub use resize::ImageResize;
