//! VisualBrief API Library
//!
//! HTTP surface for VisualBrief: stateless analysis and document export, plus the
//! in-memory brief session (uploads, background analysis, progress, result).

pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
mod telemetry;
mod utils;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
