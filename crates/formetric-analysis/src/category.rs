//! Exercise category classification.
//!
//! The category is resolved once from the exercise identifier at entry
//! and drives which joint check and control limb apply during scoring,
//! rather than scattering identifier matching through the scoring logic.

use formetric_core::MetricId;
use serde::{Deserialize, Serialize};

/// Movement family of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Press,
    Dip,
    Curl,
    Raise,
    Squat,
    General,
}

impl ExerciseCategory {
    /// Classify an exercise identifier; the first matching keyword wins.
    pub fn classify(exercise_id: &str) -> Self {
        let id = exercise_id.to_lowercase();
        if id.contains("press") {
            Self::Press
        } else if id.contains("dip") {
            Self::Dip
        } else if id.contains("curl") {
            Self::Curl
        } else if id.contains("raise") {
            Self::Raise
        } else if id.contains("squat") {
            Self::Squat
        } else {
            Self::General
        }
    }

    /// Whether the armpit-angle joint check applies.
    pub fn checks_armpit_angle(&self) -> bool {
        matches!(self, Self::Press | Self::Dip)
    }

    /// The limb vector driving the control score, if any.
    pub fn control_limb(&self) -> Option<MetricId> {
        match self {
            Self::Curl | Self::Raise => Some(MetricId::ElbowVec),
            Self::Squat => Some(MetricId::KneeVec),
            Self::Press | Self::Dip | Self::General => None,
        }
    }
}
