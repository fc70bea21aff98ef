//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Headroom above the raw file limits for multipart framing and JSON encoding.
pub const BODY_LIMIT_OVERHEAD_BYTES: usize = 1024 * 1024;
