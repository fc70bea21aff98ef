use serde::{Deserialize, Serialize};

/// Which stage of the brief workflow a session is in.
///
/// A failed analysis returns the session to `Collecting` with an error message
/// attached, so there is no separate resting state for failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Collecting,
    Analyzing,
    ShowingResult,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Collecting => "collecting",
            AnalysisState::Analyzing => "analyzing",
            AnalysisState::ShowingResult => "showing_result",
        }
    }
}

impl std::fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
