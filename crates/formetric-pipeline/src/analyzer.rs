//! Top-level orchestration of analysis runs.

use std::sync::Arc;

use formetric_agents::NarrativeGenerator;
use formetric_core::{FramePose, Result, ScoreReport};

use crate::progress::ProgressUpdate;
use crate::reference::ReferenceLibrary;
use crate::run::AnalysisRun;
use crate::source::PoseSource;

/// Entry point for movement-fidelity analysis.
///
/// Holds the read-only dependencies shared by all runs: the reference
/// library and, optionally, a narrative generator. Both are passed in
/// explicitly at construction; independent runs share no mutable state.
pub struct FormAnalyzer {
    library: Arc<dyn ReferenceLibrary>,
    narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl FormAnalyzer {
    pub fn new(library: Arc<dyn ReferenceLibrary>) -> Self {
        Self {
            library,
            narrator: None,
        }
    }

    /// Attach a narrative generator for coach feedback.
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Exercises the underlying library can score against.
    pub fn exercises(&self) -> Vec<String> {
        self.library.exercises()
    }

    /// Begin a staged run the caller drives via [`AnalysisRun::advance`].
    pub fn start_run(&self, exercise_id: &str, frames: Vec<FramePose>) -> Result<AnalysisRun> {
        AnalysisRun::new(exercise_id, frames, self.library.clone())
    }

    /// Drive a full run to completion, discarding progress events.
    pub fn analyze(&self, exercise_id: &str, frames: Vec<FramePose>) -> Result<ScoreReport> {
        self.analyze_streaming(exercise_id, frames, |_| {})
    }

    /// Drive a full run, forwarding every progress event to `emit`.
    pub fn analyze_streaming(
        &self,
        exercise_id: &str,
        frames: Vec<FramePose>,
        mut emit: impl FnMut(&ProgressUpdate),
    ) -> Result<ScoreReport> {
        let mut run = self.start_run(exercise_id, frames)?;
        while let Some(update) = run.advance() {
            emit(&update);
        }
        run.into_outcome()
    }

    /// Analyze frames pulled from a pose source.
    pub fn analyze_source(
        &self,
        exercise_id: &str,
        source: &mut dyn PoseSource,
    ) -> Result<ScoreReport> {
        let frames = source.frames()?;
        self.analyze(exercise_id, frames)
    }

    /// Full pipeline plus coach narrative for the final report.
    ///
    /// A failed narration is logged and dropped; it never withholds the
    /// score report.
    pub async fn analyze_with_narrative(
        &self,
        exercise_id: &str,
        frames: Vec<FramePose>,
    ) -> Result<(ScoreReport, Option<String>)> {
        let report = self.analyze(exercise_id, frames)?;

        let narrative = match &self.narrator {
            Some(agent) => match agent.narrate(&report, exercise_id).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(agent = agent.name(), error = %e, "narrative generation failed");
                    None
                }
            },
            None => None,
        };

        Ok((report, narrative))
    }
}
