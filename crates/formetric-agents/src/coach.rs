//! Coach agent producing feedback text from a score report.

use async_trait::async_trait;
use formetric_core::ScoreReport;

use crate::agent::{AgentConfig, AgentResult, NarrativeGenerator};
use crate::prompts::format_coach_input;

/// Coach feedback agent.
///
/// Generation is template-backed; a production deployment would send
/// [`crate::prompts::COACH_SYSTEM_PROMPT`] plus the formatted input to
/// the configured LLM instead.
pub struct CoachAgent {
    config: AgentConfig,
    name: String,
}

impl CoachAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            name: "Coach".to_string(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn verdict(final_score: u8) -> &'static str {
        if final_score >= 90 {
            "Excellent execution. Your movement closely tracks the reference."
        } else if final_score >= 75 {
            "Solid execution with a few areas to tighten up."
        } else if final_score >= 50 {
            "Decent attempt, but several aspects of your form drift from the reference."
        } else {
            "Your form needs significant work before adding load."
        }
    }

    fn category_cues(report: &ScoreReport) -> Vec<String> {
        let mut cues = Vec::new();

        if report.spine < 100.0 {
            cues.push(format!(
                "**Spine ({}/100)**: your back rounds during the movement (mean curvature {}\u{b0}). Brace your core and keep a neutral spine throughout.",
                report.spine, report.mean_spine_curvature
            ));
        }
        if report.stability < 90.0 {
            cues.push(format!(
                "**Stability ({:.0}/100)**: your torso wanders compared to the reference. Slow the tempo and control the weight through the whole range.",
                report.stability
            ));
        }
        if report.joint < 100.0 {
            cues.push(format!(
                "**Joint ({}/100)**: your elbows flare away from your torso. Tuck them closer to protect the shoulder.",
                report.joint
            ));
        }
        if report.control < 90.0 {
            cues.push(format!(
                "**Control ({:.0}/100)**: the working limb's path deviates from the reference trajectory. Focus on a consistent bar path every rep.",
                report.control
            ));
        }

        cues
    }

    fn compose(&self, report: &ScoreReport, exercise_id: &str) -> String {
        let mut text = format!(
            "### Form Analysis: {}\n\n{}\n\n",
            exercise_id,
            Self::verdict(report.final_score)
        );

        let cues = Self::category_cues(report);
        if cues.is_empty() {
            text.push_str(
                "All four categories scored at the top of their range. Keep training with this quality of movement.\n",
            );
        } else {
            for cue in &cues {
                text.push_str("* ");
                text.push_str(cue);
                text.push('\n');
            }
        }

        text
    }
}

impl Default for CoachAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

#[async_trait]
impl NarrativeGenerator for CoachAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn narrate(&self, report: &ScoreReport, exercise_id: &str) -> AgentResult<String> {
        let prompt = format_coach_input(report, exercise_id);
        tracing::debug!(
            agent = %self.name,
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "generating coach feedback"
        );

        Ok(self.compose(report, exercise_id))
    }
}
