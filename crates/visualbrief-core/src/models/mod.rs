//! Data models for the application
//!
//! Uploaded assets, the creative brief produced by the analysis service and the
//! session state that drives which view is visible.

mod asset;
mod brief;
mod state;

pub use asset::*;
pub use brief::*;
pub use state::*;
