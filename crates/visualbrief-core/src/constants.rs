//! Application-wide constants.

/// Maximum number of images held by one session.
pub const MAX_IMAGES: usize = 3;

/// Maximum size of a single uploaded file, before normalization.
pub const MAX_FILE_SIZE_MB: usize = 5;
pub const MAX_FILE_SIZE_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Larger image dimension after normalization, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// JPEG quality used when re-encoding uploads (0-100).
pub const JPEG_QUALITY: u8 = 85;

/// Media type of every normalized payload.
pub const NORMALIZED_MEDIA_TYPE: &str = "image/jpeg";

/// Declared media types accepted by the upload surface.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Interval between cosmetic progress phases.
pub const PROGRESS_STEP_INTERVAL_MS: u64 = 1500;

/// Filename of the exported document.
pub const BRIEF_PDF_FILENAME: &str = "creative-brief.pdf";

/// Attribution line printed in the document footer.
pub const PRODUCT_ATTRIBUTION: &str = "Generated by VisualBrief AI";

/// User-facing message for every analysis failure.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze images. Please ensure your API key is valid and try again.";
