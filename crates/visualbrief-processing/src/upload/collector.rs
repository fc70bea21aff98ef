use super::types::{CandidateFile, UploadError};
use crate::image::ImageNormalizer;
use crate::validator::{MediaValidator, ValidationError};
use futures::future::join_all;
use uuid::Uuid;
use visualbrief_core::constants::MAX_IMAGES;
use visualbrief_core::{Config, UploadedAsset};

/// Ordered collection of the session's normalized images.
///
/// Failures never abort a batch (except the capacity check, which rejects it
/// whole); the last one is kept in [`UploadCollector::last_error`].
#[derive(Debug)]
pub struct UploadCollector {
    validator: MediaValidator,
    normalizer: ImageNormalizer,
    max_images: usize,
    assets: Vec<UploadedAsset>,
    last_error: Option<UploadError>,
}

impl Default for UploadCollector {
    fn default() -> Self {
        Self::new(MAX_IMAGES, MediaValidator::default(), ImageNormalizer::default())
    }
}

impl UploadCollector {
    pub fn new(max_images: usize, validator: MediaValidator, normalizer: ImageNormalizer) -> Self {
        Self {
            validator,
            normalizer,
            max_images,
            assets: Vec::new(),
            last_error: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_images,
            MediaValidator::images(config.max_file_size_bytes),
            ImageNormalizer::new(config.max_image_dimension, config.jpeg_quality),
        )
    }

    pub fn assets(&self) -> &[UploadedAsset] {
        &self.assets
    }

    pub fn last_error(&self) -> Option<&UploadError> {
        self.last_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    pub fn remaining_capacity(&self) -> usize {
        self.max_images.saturating_sub(self.assets.len())
    }

    /// Validate and normalize a batch, appending the survivors in input order.
    pub async fn add(&mut self, candidates: Vec<CandidateFile>) -> &[UploadedAsset] {
        self.last_error = None;

        if candidates.is_empty() {
            return &self.assets;
        }

        if self.assets.len() + candidates.len() > self.max_images {
            tracing::warn!(
                existing = self.assets.len(),
                batch = candidates.len(),
                max = self.max_images,
                "Upload batch rejected: too many images"
            );
            self.last_error = Some(UploadError::TooManyFiles {
                max: self.max_images,
            });
            return &self.assets;
        }

        // Per-file validation keeps input order; rejected files hold their error.
        let checked: Vec<Result<CandidateFile, UploadError>> = candidates
            .into_iter()
            .map(|file| self.check(file))
            .collect();

        let normalizer = self.normalizer;
        let outcomes = join_all(checked.into_iter().map(move |checked| async move {
            let file = match checked {
                Ok(file) => file,
                Err(e) => return Err(e),
            };
            match normalizer.normalize(file.data.clone()).await {
                Ok(normalized) => Ok((file, normalized)),
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "Image normalization failed");
                    Err(UploadError::ProcessingFailed { name: file.name })
                }
            }
        }))
        .await;

        for outcome in outcomes {
            match outcome {
                Ok((file, normalized)) => {
                    let asset = UploadedAsset {
                        id: Uuid::new_v4(),
                        size_bytes: file.size(),
                        name: file.name,
                        declared_media_type: file.content_type,
                        data_url: normalized.data_url,
                        transport_payload: normalized.transport_payload,
                        media_type: normalized.media_type,
                        width: normalized.width,
                        height: normalized.height,
                    };
                    tracing::info!(
                        asset_id = %asset.id,
                        name = %asset.name,
                        width = asset.width,
                        height = asset.height,
                        "Image added"
                    );
                    self.assets.push(asset);
                }
                Err(e) => self.last_error = Some(e),
            }
        }

        &self.assets
    }

    fn check(&self, file: CandidateFile) -> Result<CandidateFile, UploadError> {
        if let Err(e) = self.validator.validate_file_size(file.size()) {
            tracing::debug!(file = %file.name, error = %e, "Upload rejected");
            return Err(match e {
                ValidationError::EmptyFile => UploadError::ProcessingFailed { name: file.name },
                _ => UploadError::FileTooLarge {
                    name: file.name,
                    max_mb: self.validator.max_file_size() / (1024 * 1024),
                },
            });
        }

        if let Err(e) = self.validator.validate_content_type(&file.content_type) {
            tracing::debug!(file = %file.name, error = %e, "Upload rejected");
            return Err(UploadError::NotAnImage { name: file.name });
        }

        Ok(file)
    }

    /// Remove an asset by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.assets.len();
        self.assets.retain(|asset| asset.id != id);
        let removed = self.assets.len() != before;
        if removed {
            tracing::debug!(asset_id = %id, "Image removed");
        }
        removed
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Drop every asset and the last error.
    pub fn clear(&mut self) {
        self.assets.clear();
        self.last_error = None;
    }
}
