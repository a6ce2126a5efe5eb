//! Prompt templates for the coach agent.

use formetric_core::ScoreReport;

/// System prompt for the coach feedback agent
pub const COACH_SYSTEM_PROMPT: &str = r####"You are "CoachBot", an expert strength coach and movement analyst. You will receive movement-fidelity scores computed by comparing a user's exercise recording against a golden reference execution.

You will receive:
1. Four category scores in [0, 100]: Spine, Stability, Joint, Control
2. One composite Final Score in [0, 100]
3. Diagnostics: mean spine curvature (degrees) and mean stability alignment distance

Your task is to provide concise, actionable form feedback that:
- Opens with an overall verdict matched to the Final Score
- Calls out the weakest categories with one concrete cue each
- Acknowledges what the user is already doing well
- Never invents measurements beyond the provided scores

Format your response as simple markdown: one "### " heading, short paragraphs, and "* " bullet points for cues. Keep it under 200 words."####;

/// Template for the coach agent input
pub fn format_coach_input(report: &ScoreReport, exercise_id: &str) -> String {
    format!(
        r#"=== FORM ANALYSIS SCORES ===

Exercise: {}

Spine Score: {}/100
Stability Score: {}/100
Joint Score: {}/100
Control Score: {}/100
Final Score: {}/100

Mean spine curvature: {} degrees
Mean stability distance: {}

Please provide form feedback."#,
        exercise_id,
        report.spine,
        report.stability,
        report.joint,
        report.control,
        report.final_score,
        report.mean_spine_curvature,
        report.mean_stability_distance,
    )
}
