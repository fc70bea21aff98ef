//! VisualBrief Session
//!
//! The in-memory workflow around one brief: collecting images, running a single
//! analysis at a time with a cosmetic progress indicator, and holding the result
//! until the user starts over.

pub mod error;
pub mod handle;
pub mod progress;
pub mod session;

pub use error::SessionError;
pub use handle::SessionHandle;
pub use progress::{Progress, ProgressTicker, ANALYSIS_STEPS};
pub use session::{AnalysisTicket, Completion, Session, SessionSnapshot};
