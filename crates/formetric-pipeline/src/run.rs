//! Forward-only staged analysis run.

use std::sync::Arc;

use formetric_analysis::{
    align, extract_sequence, score_aligned, AlignmentDistances, ExerciseCategory,
};
use formetric_core::{Error, FramePose, MetricId, MetricSequence, Result, ScoreReport};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progress::{AnalysisStage, ProgressUpdate};
use crate::reference::ReferenceLibrary;

/// Unique identifier for one analysis run (logging and event correlation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

enum RunState {
    Extracting {
        frames: Vec<FramePose>,
    },
    LookingUpReference {
        user: MetricSequence,
    },
    Aligning {
        user: MetricSequence,
        reference: MetricSequence,
    },
    Scoring {
        user: MetricSequence,
        distances: AlignmentDistances,
    },
    Reporting {
        report: ScoreReport,
    },
}

/// One staged analysis of a recording against its golden reference.
///
/// The caller drives the run: every [`AnalysisRun::advance`] call
/// executes exactly one stage and returns its progress event, so status
/// can be reported between stages without an internal scheduler or
/// background threads. The run only moves forward; abandoning it (drop)
/// releases all held frame and metric buffers and no further stage
/// executes.
pub struct AnalysisRun {
    id: RunId,
    exercise_id: String,
    category: ExerciseCategory,
    library: Arc<dyn ReferenceLibrary>,
    state: Option<RunState>,
    outcome: Option<Result<ScoreReport>>,
}

impl AnalysisRun {
    /// Start a run over an already-sourced frame sequence.
    pub fn new(
        exercise_id: impl Into<String>,
        frames: Vec<FramePose>,
        library: Arc<dyn ReferenceLibrary>,
    ) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::InputUnavailable);
        }

        let exercise_id = exercise_id.into();
        let category = ExerciseCategory::classify(&exercise_id);
        let id = RunId::new();

        tracing::info!(
            run = %id,
            exercise = %exercise_id,
            ?category,
            frames = frames.len(),
            "analysis run started"
        );

        Ok(Self {
            id,
            exercise_id,
            category,
            library,
            state: Some(RunState::Extracting { frames }),
            outcome: None,
        })
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn category(&self) -> ExerciseCategory {
        self.category
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_none()
    }

    /// Execute the next stage; `None` once the run is terminal.
    pub fn advance(&mut self) -> Option<ProgressUpdate> {
        let state = self.state.take()?;

        let update = match state {
            RunState::Extracting { frames } => {
                let frame_count = frames.len();
                let user = extract_sequence(&frames);
                let detected = user.detected_count(MetricId::SpineCurvature);

                self.state = Some(RunState::LookingUpReference { user });
                self.progress(
                    AnalysisStage::Extracting,
                    format!(
                        "Extracted metrics from {} frames ({} detected)",
                        frame_count, detected
                    ),
                )
            }
            RunState::LookingUpReference { user } => {
                match self.library.lookup(&self.exercise_id) {
                    Some(reference) => {
                        self.state = Some(RunState::Aligning { user, reference });
                        self.progress(
                            AnalysisStage::LookingUpReference,
                            format!("Loaded reference for '{}'", self.exercise_id),
                        )
                    }
                    None => self.fail(Error::ReferenceNotFound {
                        exercise: self.exercise_id.clone(),
                    }),
                }
            }
            RunState::Aligning { user, reference } => {
                let distances = align(&reference, &user, self.category);
                tracing::debug!(
                    run = %self.id,
                    shoulder = distances.shoulder,
                    hip = distances.hip,
                    control = distances.control,
                    "alignment distances computed"
                );

                self.state = Some(RunState::Scoring { user, distances });
                self.progress(
                    AnalysisStage::Aligning,
                    "Aligned user metrics against reference".to_string(),
                )
            }
            RunState::Scoring { user, distances } => {
                let report = score_aligned(&user, self.category, &distances);
                tracing::info!(
                    run = %self.id,
                    final_score = report.final_score,
                    "scoring complete"
                );

                self.state = Some(RunState::Reporting { report });
                self.progress(AnalysisStage::Scoring, "Computed category scores".to_string())
            }
            RunState::Reporting { report } => {
                self.outcome = Some(Ok(report.clone()));
                ProgressUpdate::Complete {
                    message: "Analysis complete".to_string(),
                    percent: AnalysisStage::Complete.percent(),
                    scores: report,
                    narrative: None,
                }
            }
        };

        Some(update)
    }

    /// Abandon the run; held buffers are released immediately.
    pub fn cancel(self) {
        tracing::info!(run = %self.id, "analysis run cancelled");
    }

    /// Terminal result, once the run has finished.
    pub fn into_outcome(self) -> Result<ScoreReport> {
        self.outcome.unwrap_or(Err(Error::Incomplete))
    }

    fn progress(&self, stage: AnalysisStage, message: String) -> ProgressUpdate {
        ProgressUpdate::Progress {
            stage,
            message,
            percent: stage.percent(),
        }
    }

    fn fail(&mut self, error: Error) -> ProgressUpdate {
        tracing::error!(run = %self.id, %error, "analysis run failed");
        let message = error.to_string();
        self.outcome = Some(Err(error));
        ProgressUpdate::Error { message }
    }
}
