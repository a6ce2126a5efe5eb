//! Progress protocol for staged analysis runs.

use formetric_core::ScoreReport;
use serde::{Deserialize, Serialize};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Extracting,
    LookingUpReference,
    Aligning,
    Scoring,
    Complete,
    Failed,
}

impl AnalysisStage {
    /// Completion percentage reported when this stage finishes.
    ///
    /// Percentages grow with stage order, so a well-formed event stream
    /// is monotonically non-decreasing.
    pub fn percent(&self) -> u8 {
        match self {
            Self::Extracting => 30,
            Self::LookingUpReference => 50,
            Self::Aligning => 80,
            Self::Scoring => 95,
            Self::Complete | Self::Failed => 100,
        }
    }
}

/// One event on the progress stream.
///
/// Serializes as newline-delimited JSON for streaming clients: `status`
/// discriminates progress updates from the terminal `complete` (carrying
/// the report, plus narrative when combined) and `error` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressUpdate {
    Progress {
        stage: AnalysisStage,
        message: String,
        percent: u8,
    },
    Complete {
        message: String,
        percent: u8,
        scores: ScoreReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        narrative: Option<String>,
    },
    Error {
        message: String,
    },
}

impl ProgressUpdate {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }

    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Progress { percent, .. } | Self::Complete { percent, .. } => Some(*percent),
            Self::Error { .. } => None,
        }
    }
}
