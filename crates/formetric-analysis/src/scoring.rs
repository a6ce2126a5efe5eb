//! Composite scoring policy combining per-metric alignment distances.

use formetric_core::{MetricId, MetricSequence, ScoreReport};
use serde::{Deserialize, Serialize};

use crate::category::ExerciseCategory;
use crate::dtw::alignment_distance;

/// Spine curvature assumed when no frame produced a valid sample.
pub const DEFAULT_SPINE_CURVATURE: f64 = 26.0;

const STABILITY_WEIGHT: f64 = 0.35;
const SPINE_WEIGHT: f64 = 0.35;
const JOINT_WEIGHT: f64 = 0.20;
const CONTROL_WEIGHT: f64 = 0.10;

const STABILITY_DISTANCE_FACTOR: f64 = 33.3;
const CONTROL_DISTANCE_FACTOR: f64 = 50.0;

/// Per-metric alignment distances feeding the scoring policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentDistances {
    pub shoulder: f64,
    pub hip: f64,
    /// Distance on the category's control limb; 0.0 when none applies.
    pub control: f64,
}

/// Align the user sequence against the reference on every metric the
/// scoring policy consumes.
pub fn align(
    reference: &MetricSequence,
    user: &MetricSequence,
    category: ExerciseCategory,
) -> AlignmentDistances {
    AlignmentDistances {
        shoulder: metric_distance(reference, user, MetricId::ShoulderVec),
        hip: metric_distance(reference, user, MetricId::HipVec),
        control: category
            .control_limb()
            .map(|limb| metric_distance(reference, user, limb))
            .unwrap_or(0.0),
    }
}

/// Score a user recording against its golden reference.
pub fn score(
    reference: &MetricSequence,
    user: &MetricSequence,
    category: ExerciseCategory,
) -> ScoreReport {
    let distances = align(reference, user, category);
    score_aligned(user, category, &distances)
}

/// Combine precomputed alignment distances with the user sequence's
/// aggregate statistics into the final report.
pub fn score_aligned(
    user: &MetricSequence,
    category: ExerciseCategory,
    distances: &AlignmentDistances,
) -> ScoreReport {
    let mean_spine =
        mean_scalar(user, MetricId::SpineCurvature).unwrap_or(DEFAULT_SPINE_CURVATURE);
    let spine = spine_score(mean_spine);

    let stability_distance = (distances.shoulder + distances.hip) / 2.0;
    // The subtrahend is clamped before subtraction; do not reorder.
    let stability = 100.0 - (stability_distance * STABILITY_DISTANCE_FACTOR).min(100.0);

    let joint = joint_score(user, category);

    let control = 100.0 - (distances.control * CONTROL_DISTANCE_FACTOR).min(100.0);

    let weighted = stability * STABILITY_WEIGHT
        + spine * SPINE_WEIGHT
        + joint * JOINT_WEIGHT
        + control * CONTROL_WEIGHT;

    ScoreReport {
        spine,
        stability,
        joint,
        control,
        // Truncation toward zero, not rounding.
        final_score: weighted.trunc() as u8,
        mean_spine_curvature: round2(mean_spine),
        mean_stability_distance: round2(stability_distance),
    }
}

fn metric_distance(reference: &MetricSequence, user: &MetricSequence, metric: MetricId) -> f64 {
    alignment_distance(&reference.valid_points(metric), &user.valid_points(metric))
}

fn mean_scalar(sequence: &MetricSequence, metric: MetricId) -> Option<f64> {
    let values = sequence.valid_scalars(metric);
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn spine_score(mean_curvature: f64) -> f64 {
    if mean_curvature <= 15.0 {
        100.0
    } else if mean_curvature <= 20.0 {
        60.0
    } else if mean_curvature <= 25.0 {
        30.0
    } else {
        0.0
    }
}

fn joint_score(user: &MetricSequence, category: ExerciseCategory) -> f64 {
    if !category.checks_armpit_angle() {
        return 100.0;
    }

    match mean_scalar(user, MetricId::ArmpitAngle) {
        Some(mean) if mean > 85.0 => 20.0,
        Some(mean) if mean > 75.0 => 60.0,
        _ => 100.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use formetric_core::{FrameMetrics, MetricFrame};

    fn frame(spine_curvature: f64, armpit_angle: f64, t: f64) -> MetricFrame {
        MetricFrame::Detected(FrameMetrics {
            torso_angle: 170.0 + t.sin(),
            spine_curvature,
            armpit_angle,
            shoulder_vec: [t.sin() * 0.1, -1.0 + t.cos() * 0.05],
            elbow_vec: [0.2 + t.sin() * 0.3, 0.4],
            hip_vec: [0.0, 1.0 + t.sin() * 0.1],
            knee_vec: [t.cos() * 0.2, 0.9],
        })
    }

    fn sequence(len: usize, spine_curvature: f64, armpit_angle: f64) -> MetricSequence {
        let frames: Vec<MetricFrame> = (0..len)
            .map(|i| frame(spine_curvature, armpit_angle, i as f64 * 0.4))
            .collect();
        MetricSequence::from_frames(&frames)
    }

    fn no_distances() -> AlignmentDistances {
        AlignmentDistances {
            shoulder: 0.0,
            hip: 0.0,
            control: 0.0,
        }
    }

    #[test]
    fn test_spine_bucket_boundaries() {
        assert_eq!(spine_score(15.0), 100.0);
        assert_eq!(spine_score(15.01), 60.0);
        assert_eq!(spine_score(20.0), 60.0);
        assert_eq!(spine_score(25.0), 30.0);
        assert_eq!(spine_score(25.01), 0.0);
    }

    #[test]
    fn test_spine_default_when_no_valid_samples() {
        let empty = MetricSequence::default();
        let report = score_aligned(&empty, ExerciseCategory::General, &no_distances());

        // The 26-degree fallback lands past the last bucket.
        assert_eq!(report.spine, 0.0);
        assert_eq!(report.mean_spine_curvature, 26.0);
    }

    #[test]
    fn test_joint_buckets_for_press() {
        let category = ExerciseCategory::classify("overhead press");

        let high = sequence(20, 10.0, 90.0);
        assert_eq!(score_aligned(&high, category, &no_distances()).joint, 20.0);

        let mid = sequence(20, 10.0, 80.0);
        assert_eq!(score_aligned(&mid, category, &no_distances()).joint, 60.0);

        let low = sequence(20, 10.0, 70.0);
        assert_eq!(score_aligned(&low, category, &no_distances()).joint, 100.0);
    }

    #[test]
    fn test_joint_ignored_for_squat() {
        let category = ExerciseCategory::classify("squat");
        let user = sequence(20, 10.0, 90.0);
        assert_eq!(score_aligned(&user, category, &no_distances()).joint, 100.0);
    }

    #[test]
    fn test_joint_stays_default_without_samples() {
        let empty = MetricSequence::default();
        let report = score_aligned(&empty, ExerciseCategory::Press, &no_distances());
        assert_eq!(report.joint, 100.0);
    }

    #[test]
    fn test_stability_clamps_subtrahend() {
        let user = sequence(20, 10.0, 70.0);
        let distances = AlignmentDistances {
            shoulder: 50.0,
            hip: 50.0,
            control: 0.0,
        };
        let report = score_aligned(&user, ExerciseCategory::General, &distances);
        assert_eq!(report.stability, 0.0);
        assert_eq!(report.mean_stability_distance, 50.0);
    }

    #[test]
    fn test_stability_scales_distance() {
        let user = sequence(20, 10.0, 70.0);
        let distances = AlignmentDistances {
            shoulder: 1.0,
            hip: 1.0,
            control: 0.0,
        };
        let report = score_aligned(&user, ExerciseCategory::General, &distances);
        assert!((report.stability - (100.0 - 33.3)).abs() < 1e-9);
        assert_eq!(report.mean_stability_distance, 1.0);
    }

    #[test]
    fn test_control_scales_distance() {
        let user = sequence(20, 10.0, 70.0);
        let distances = AlignmentDistances {
            shoulder: 0.0,
            hip: 0.0,
            control: 0.5,
        };
        let report = score_aligned(&user, ExerciseCategory::Squat, &distances);
        assert_eq!(report.control, 75.0);
    }

    #[test]
    fn test_final_score_truncates_toward_zero() {
        // spine 100, stability 99.9, joint 100, control 100:
        // 0.35*99.9 + 0.35*100 + 0.2*100 + 0.1*100 = 99.965 -> 99.
        let user = sequence(20, 10.0, 70.0);
        let distances = AlignmentDistances {
            shoulder: 0.1 / 33.3 * 2.0,
            hip: 0.0,
            control: 0.0,
        };
        let report = score_aligned(&user, ExerciseCategory::General, &distances);
        assert!((report.stability - 99.9).abs() < 1e-9);
        assert_eq!(report.final_score, 99);
    }

    #[test]
    fn test_final_score_in_range() {
        let user = sequence(20, 30.0, 90.0);
        let distances = AlignmentDistances {
            shoulder: 1000.0,
            hip: 1000.0,
            control: 1000.0,
        };
        let report = score_aligned(&user, ExerciseCategory::Press, &distances);
        assert_eq!(report.spine, 0.0);
        assert_eq!(report.stability, 0.0);
        assert_eq!(report.control, 0.0);
        assert_eq!(report.joint, 20.0);
        assert_eq!(report.final_score, 4);
    }

    #[test]
    fn test_perfect_run_scores_100() {
        let user = sequence(30, 10.0, 70.0);
        let report = score(&user.clone(), &user, ExerciseCategory::Squat);
        assert_eq!(report.stability, 100.0);
        assert_eq!(report.control, 100.0);
        assert_eq!(report.spine, 100.0);
        assert_eq!(report.joint, 100.0);
        assert_eq!(report.final_score, 100);
    }

    #[test]
    fn test_missing_metric_is_neutral() {
        // Reference without limb vectors: every alignment degenerates to 0.
        let reference = MetricSequence::default();
        let user = sequence(30, 10.0, 70.0);
        let report = score(&reference, &user, ExerciseCategory::Squat);
        assert_eq!(report.stability, 100.0);
        assert_eq!(report.control, 100.0);
    }

    #[test]
    fn test_diagnostics_rounding() {
        let user = sequence(20, 12.3456, 70.0);
        let report = score_aligned(&user, ExerciseCategory::General, &no_distances());
        assert_eq!(report.mean_spine_curvature, 12.35);
    }

    #[test]
    fn test_determinism() {
        let reference = sequence(30, 12.0, 70.0);
        let user = sequence(25, 14.0, 72.0);
        let a = score(&reference, &user, ExerciseCategory::Squat);
        let b = score(&reference, &user, ExerciseCategory::Squat);
        assert_eq!(a, b);
    }
}
