//! Application state shared by every handler.

use std::sync::Arc;
use visualbrief_analysis::{AnalysisContext, BriefClient};
use visualbrief_core::Config;
use visualbrief_session::{Session, SessionHandle};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless analysis for `/api/analyze`; shares its provider with the session.
    pub client: BriefClient,
    pub session: SessionHandle,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let context = Arc::new(AnalysisContext::new(config.clone()));
        Self::with_context(config, context)
    }

    /// Build the state around an existing analysis context (tests inject a fake provider here).
    pub fn with_context(config: Config, context: Arc<AnalysisContext>) -> Self {
        let client = BriefClient::new(context);
        let session = SessionHandle::new(Session::from_config(&config), client.clone());
        Self {
            config,
            client,
            session,
        }
    }
}
