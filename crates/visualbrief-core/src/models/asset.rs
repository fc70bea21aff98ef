use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An uploaded image that passed validation and normalization.
///
/// `data_url` is suitable for display; `transport_payload` is the same JPEG as
/// bare base64, which is what the analysis service receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub id: Uuid,
    pub name: String,
    /// Size of the original file in bytes, before normalization.
    pub size_bytes: usize,
    /// Media type declared by the uploader.
    pub declared_media_type: String,
    #[serde(skip_serializing)]
    pub data_url: String,
    #[serde(skip_serializing)]
    pub transport_payload: String,
    /// Media type of the normalized payload (always JPEG).
    pub media_type: String,
    pub width: u32,
    pub height: u32,
}

impl UploadedAsset {
    pub fn payload(&self) -> ImagePayload {
        ImagePayload {
            base64_data: self.transport_payload.clone(),
            mime_type: self.media_type.clone(),
        }
    }
}

/// Transport form of one image as sent to the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub base64_data: String,
    pub mime_type: String,
}
