//! Session state machine.
//!
//! ```text
//! Collecting --start_analysis--> Analyzing --success--> ShowingResult
//!     ^                              |                       |
//!     +------ failure / cancel ------+                       |
//!     +------------------------- reset ----------------------+
//! ```
//!
//! Every analysis carries the generation it was started in. `cancel` and
//! `reset` bump the generation, so a completion that arrives afterwards is
//! recognized as stale and dropped.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use visualbrief_analysis::AnalysisError;
use visualbrief_core::constants::PROGRESS_STEP_INTERVAL_MS;
use visualbrief_core::{AnalysisState, BriefStats, Config, CreativeBrief, UploadedAsset};
use visualbrief_processing::{CandidateFile, UploadCollector};

use crate::error::SessionError;
use crate::progress::{Progress, ProgressTicker};

/// Outcome of applying an analysis result to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    Failed,
    /// The session moved on (cancel or reset) before the result arrived.
    Stale,
}

/// Issued by [`Session::start_analysis`]; carries what the request needs.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub assets: Vec<UploadedAsset>,
}

/// Serializable view of the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: AnalysisState,
    pub assets: Vec<UploadedAsset>,
    pub max_images: usize,
    pub error: Option<String>,
    pub progress: Progress,
    pub stats: Option<BriefStats>,
}

#[derive(Debug)]
pub struct Session {
    collector: UploadCollector,
    state: AnalysisState,
    brief: Option<Arc<CreativeBrief>>,
    error: Option<String>,
    generation: u64,
    ticker: Option<ProgressTicker>,
    progress: Progress,
    step_interval: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            UploadCollector::default(),
            Duration::from_millis(PROGRESS_STEP_INTERVAL_MS),
        )
    }
}

impl Session {
    pub fn new(collector: UploadCollector, step_interval: Duration) -> Self {
        Self {
            collector,
            state: AnalysisState::Collecting,
            brief: None,
            error: None,
            generation: 0,
            ticker: None,
            progress: Progress::idle(),
            step_interval,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            UploadCollector::from_config(config),
            Duration::from_millis(config.progress_step_interval_ms),
        )
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn assets(&self) -> &[UploadedAsset] {
        self.collector.assets()
    }

    pub fn brief(&self) -> Option<Arc<CreativeBrief>> {
        self.brief.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Analysis failure message, or else the last upload problem.
    pub fn error(&self) -> Option<String> {
        self.error
            .clone()
            .or_else(|| self.collector.last_error().map(|e| e.to_string()))
    }

    pub fn progress(&self) -> Progress {
        match &self.ticker {
            Some(ticker) => ticker.current(),
            None => self.progress,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            assets: self.collector.assets().to_vec(),
            max_images: self.collector.max_images(),
            error: self.error(),
            progress: self.progress(),
            stats: self.brief.as_ref().map(|b| b.stats()),
        }
    }

    /// Add a batch of files. Only allowed while collecting.
    pub async fn add_files(&mut self, files: Vec<CandidateFile>) -> Result<(), SessionError> {
        if self.state != AnalysisState::Collecting {
            return Err(SessionError::InvalidState {
                action: "add images",
                state: self.state,
            });
        }

        self.error = None;
        self.collector.add(files).await;
        Ok(())
    }

    /// Remove an asset. Ignored while an analysis is running.
    pub fn remove_asset(&mut self, id: Uuid) -> bool {
        if self.state == AnalysisState::Analyzing {
            tracing::debug!(asset_id = %id, "Ignoring removal during analysis");
            return false;
        }
        self.collector.remove(id)
    }

    pub fn can_start_analysis(&self) -> bool {
        self.state == AnalysisState::Collecting && !self.collector.is_empty()
    }

    /// Move to `Analyzing` and hand out the ticket for the request.
    pub fn start_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        if self.state != AnalysisState::Collecting {
            return Err(SessionError::InvalidState {
                action: "start analysis",
                state: self.state,
            });
        }
        if self.collector.is_empty() {
            return Err(SessionError::NoAssets);
        }

        self.generation += 1;
        self.state = AnalysisState::Analyzing;
        self.error = None;
        self.collector.clear_error();
        self.progress = Progress::idle();
        self.ticker = Some(ProgressTicker::start(self.step_interval));

        tracing::info!(
            generation = self.generation,
            image_count = self.collector.len(),
            "Analysis started"
        );

        Ok(AnalysisTicket {
            generation: self.generation,
            assets: self.collector.assets().to_vec(),
        })
    }

    /// Apply the result of the analysis started with `generation`.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<CreativeBrief, AnalysisError>,
    ) -> Completion {
        if generation != self.generation || self.state != AnalysisState::Analyzing {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale analysis result"
            );
            return Completion::Stale;
        }

        self.ticker = None;
        match result {
            Ok(brief) => {
                tracing::info!(
                    generation,
                    image_count = brief.meta.image_count,
                    "Analysis succeeded"
                );
                self.brief = Some(Arc::new(brief));
                self.progress = Progress::complete();
                self.state = AnalysisState::ShowingResult;
                Completion::Succeeded
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Analysis failed");
                self.error = Some(e.user_message().to_string());
                self.progress = Progress::idle();
                self.state = AnalysisState::Collecting;
                Completion::Failed
            }
        }
    }

    /// Abandon a running analysis. Its result will be ignored.
    pub fn cancel(&mut self) -> bool {
        if self.state != AnalysisState::Analyzing {
            return false;
        }

        self.generation += 1;
        self.ticker = None;
        self.progress = Progress::idle();
        self.state = AnalysisState::Collecting;
        tracing::info!(generation = self.generation, "Analysis cancelled");
        true
    }

    /// Back to an empty collecting session, from any state.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.ticker = None;
        self.collector.clear();
        self.brief = None;
        self.error = None;
        self.progress = Progress::idle();
        self.state = AnalysisState::Collecting;
        tracing::debug!(generation = self.generation, "Session reset");
    }
}
