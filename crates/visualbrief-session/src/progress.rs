//! Cosmetic progress phases shown while an analysis is running.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub const ANALYSIS_STEPS: [&str; 5] = [
    "Processing images",
    "Extracting visual style",
    "Analyzing brand voice",
    "Identifying messaging",
    "Generating brief",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub step: usize,
    pub label: &'static str,
    pub percent: u8,
    pub estimated_seconds_remaining: u8,
}

impl Progress {
    /// Progress at phase `step` (clamped to the last phase).
    pub fn at_step(step: usize) -> Self {
        let step = step.min(ANALYSIS_STEPS.len() - 1);
        Self::new(step, (step * (100 / ANALYSIS_STEPS.len())) as u8)
    }

    pub fn idle() -> Self {
        Self::at_step(0)
    }

    pub fn complete() -> Self {
        Self::new(ANALYSIS_STEPS.len() - 1, 100)
    }

    fn new(step: usize, percent: u8) -> Self {
        let remaining = (100 - percent as u32).div_ceil(20).max(1);
        Self {
            step,
            label: ANALYSIS_STEPS[step],
            percent,
            estimated_seconds_remaining: remaining as u8,
        }
    }
}

/// Advances [`Progress`] one phase per interval on a background task.
///
/// The task is aborted when the ticker is dropped.
#[derive(Debug)]
pub struct ProgressTicker {
    progress: watch::Receiver<Progress>,
    task: JoinHandle<()>,
}

impl ProgressTicker {
    /// Must be called from within a tokio runtime.
    pub fn start(step_interval: Duration) -> Self {
        let (tx, progress) = watch::channel(Progress::idle());
        let mut ticks = interval(step_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let task = tokio::spawn(async move {
            // The first tick completes immediately.
            ticks.tick().await;
            for step in 1..ANALYSIS_STEPS.len() {
                ticks.tick().await;
                if tx.send(Progress::at_step(step)).is_err() {
                    break;
                }
            }
        });

        Self { progress, task }
    }

    pub fn current(&self) -> Progress {
        *self.progress.borrow()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
