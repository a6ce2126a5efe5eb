//! Composite scoring report.

use serde::{Deserialize, Serialize};

/// Scoring result for one analyzed recording.
///
/// Category scores are in [0, 100]; the final score is the weighted
/// composite truncated toward zero. Serialized field names follow the
/// client wire contract. Constructed fresh per comparison and fully
/// determined by its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(rename = "Spine Score")]
    pub spine: f64,
    #[serde(rename = "Stability Score")]
    pub stability: f64,
    #[serde(rename = "Joint Score")]
    pub joint: f64,
    #[serde(rename = "Control Score")]
    pub control: f64,
    #[serde(rename = "Final Score")]
    pub final_score: u8,
    /// Mean user spine curvature in degrees, rounded to 2 decimals.
    pub mean_spine_curvature: f64,
    /// Mean stability alignment distance, rounded to 2 decimals.
    pub mean_stability_distance: f64,
}
