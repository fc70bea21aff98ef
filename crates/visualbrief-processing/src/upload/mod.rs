//! Upload collection: validate, normalize and hold the session's images.

pub mod collector;
pub mod types;

pub use collector::UploadCollector;
pub use types::{CandidateFile, UploadError};
