//! Image normalization: decode, bound, flatten and re-encode as JPEG.

use super::resize::ImageResize;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage};
use std::io::Cursor;
use visualbrief_core::constants::{JPEG_QUALITY, MAX_IMAGE_DIMENSION, NORMALIZED_MEDIA_TYPE};

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Normalization task failed: {0}")]
    Task(String),
}

/// A bounded JPEG ready for display and transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    /// `data:image/jpeg;base64,...`
    pub data_url: String,
    /// Same bytes as `data_url`, base64 without the prefix.
    pub transport_payload: String,
    pub media_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    max_dimension: u32,
    quality: u8,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(MAX_IMAGE_DIMENSION, JPEG_QUALITY)
    }
}

impl ImageNormalizer {
    pub fn new(max_dimension: u32, quality: u8) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Normalize on the blocking pool.
    pub async fn normalize(&self, data: Bytes) -> Result<NormalizedImage, NormalizeError> {
        let normalizer = *self;
        tokio::task::spawn_blocking(move || normalizer.normalize_blocking(&data))
            .await
            .map_err(|e| NormalizeError::Task(e.to_string()))?
    }

    /// Synchronous normalization. Prefer [`ImageNormalizer::normalize`] from async code.
    pub fn normalize_blocking(&self, data: &[u8]) -> Result<NormalizedImage, NormalizeError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let img = reader.decode().map_err(NormalizeError::Decode)?;

        let img = ImageResize::downscale_to_fit(img, self.max_dimension);
        let (width, height) = img.dimensions();
        let flattened = flatten_on_white(&img);

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .encode_image(&flattened)
            .map_err(NormalizeError::Encode)?;

        let transport_payload = STANDARD.encode(&jpeg);
        tracing::debug!(
            width,
            height,
            input_bytes = data.len(),
            output_bytes = jpeg.len(),
            "Normalized image"
        );

        Ok(NormalizedImage {
            data_url: format!("data:{};base64,{}", NORMALIZED_MEDIA_TYPE, transport_payload),
            transport_payload,
            media_type: NORMALIZED_MEDIA_TYPE.to_string(),
            width,
            height,
        })
    }
}

/// Composite any alpha channel onto an opaque white background.
fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
