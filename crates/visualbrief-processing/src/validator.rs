use visualbrief_core::constants::MAX_FILE_SIZE_BYTES;

/// Common validation errors for uploaded files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (expected prefix: {expected_prefix})")]
    InvalidContentType {
        content_type: String,
        expected_prefix: String,
    },

    #[error("Empty file")]
    EmptyFile,
}

/// Upload validator
///
/// Checks only what is declared about a file (its byte size and media type).
/// Whether the bytes actually decode is left to the normalizer.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: usize,
    content_type_prefix: String,
}

impl MediaValidator {
    pub fn new(max_file_size: usize, content_type_prefix: impl Into<String>) -> Self {
        Self {
            max_file_size,
            content_type_prefix: content_type_prefix.into(),
        }
    }

    /// Validator for image uploads with the given size cap.
    pub fn images(max_file_size: usize) -> Self {
        Self::new(max_file_size, "image/")
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate declared content type by prefix (case-insensitive)
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.trim().to_lowercase();

        if !normalized.starts_with(&self.content_type_prefix) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                expected_prefix: self.content_type_prefix.clone(),
            });
        }

        Ok(())
    }
}

impl Default for MediaValidator {
    fn default() -> Self {
        Self::images(MAX_FILE_SIZE_BYTES)
    }
}
