//! Types for the upload collector.

use bytes::Bytes;

/// A file offered for upload, before validation.
#[derive(Clone, Debug)]
pub struct CandidateFile {
    pub name: String,
    /// Media type declared by the client.
    pub content_type: String,
    pub data: Bytes,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Recoverable upload failures. The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("You can only upload a maximum of {max} images.")]
    TooManyFiles { max: usize },

    #[error("File {name} exceeds {max_mb}MB limit.")]
    FileTooLarge { name: String, max_mb: usize },

    #[error("File {name} is not a valid image.")]
    NotAnImage { name: String },

    #[error("Failed to process image. Please try again.")]
    ProcessingFailed { name: String },
}

impl UploadError {
    /// Name of the offending file, when the error concerns a single file.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            UploadError::TooManyFiles { .. } => None,
            UploadError::FileTooLarge { name, .. }
            | UploadError::NotAnImage { name }
            | UploadError::ProcessingFailed { name } => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            UploadError::TooManyFiles { max: 3 }.to_string(),
            "You can only upload a maximum of 3 images."
        );
        assert_eq!(
            UploadError::FileTooLarge {
                name: "big.jpg".to_string(),
                max_mb: 5
            }
            .to_string(),
            "File big.jpg exceeds 5MB limit."
        );
        assert_eq!(
            UploadError::NotAnImage {
                name: "notes.pdf".to_string()
            }
            .to_string(),
            "File notes.pdf is not a valid image."
        );
        assert_eq!(
            UploadError::ProcessingFailed {
                name: "broken.png".to_string()
            }
            .to_string(),
            "Failed to process image. Please try again."
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(UploadError::TooManyFiles { max: 3 }.file_name(), None);
        assert_eq!(
            UploadError::NotAnImage {
                name: "a.txt".to_string()
            }
            .file_name(),
            Some("a.txt")
        );
    }
}
