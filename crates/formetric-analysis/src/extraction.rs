//! Per-frame metric extraction from detected keypoints.

use formetric_core::{
    geometry, BodySide, FrameMetrics, FramePose, MetricFrame, MetricSequence, SideKeypoints,
};

/// Minimum side confidence for a frame to count as detected.
pub const MIN_SIDE_CONFIDENCE: f32 = 0.3;

/// Extract the metric record for a single frame.
///
/// Builds both side views, keeps the one with the higher minimum
/// confidence, and degrades to [`MetricFrame::Undetected`] when even
/// that side falls below [`MIN_SIDE_CONFIDENCE`].
pub fn extract_frame(pose: &FramePose) -> MetricFrame {
    let left = SideKeypoints::from_pose(pose, BodySide::Left);
    let right = SideKeypoints::from_pose(pose, BodySide::Right);

    let side = if left.min_confidence > right.min_confidence {
        left
    } else {
        right
    };

    if side.min_confidence < MIN_SIDE_CONFIDENCE {
        return MetricFrame::Undetected;
    }

    compute_metrics(&side)
}

fn compute_metrics(side: &SideKeypoints) -> MetricFrame {
    let torso_angle = geometry::angle_at(side.shoulder, side.hip, side.knee);
    let hip_ankle_angle = geometry::angle_at(side.shoulder, side.hip, side.ankle);
    let spine_curvature = (hip_ankle_angle - torso_angle).abs();
    let armpit_angle = geometry::angle_at(side.elbow, side.shoulder, side.hip);

    let scale = geometry::torso_scale(side.shoulder, side.hip);

    let metrics = FrameMetrics {
        torso_angle,
        spine_curvature,
        armpit_angle,
        shoulder_vec: geometry::scaled_offset(side.shoulder, side.hip, scale),
        elbow_vec: geometry::scaled_offset(side.elbow, side.shoulder, scale),
        hip_vec: geometry::scaled_offset(side.hip, side.knee, scale),
        knee_vec: geometry::scaled_offset(side.knee, side.ankle, scale),
    };

    if !metrics.is_finite() {
        return MetricFrame::Undetected;
    }

    MetricFrame::Detected(metrics)
}

/// Extract the full per-video metric sequence, one entry per frame.
///
/// Undetected frames are recorded as nulls; a single bad frame never
/// aborts the pass.
pub fn extract_sequence(poses: &[FramePose]) -> MetricSequence {
    let frames: Vec<MetricFrame> = poses.iter().map(extract_frame).collect();

    let undetected = frames.iter().filter(|f| !f.is_detected()).count();
    if undetected > 0 {
        tracing::debug!("{} of {} frames undetected", undetected, frames.len());
    }

    MetricSequence::from_frames(&frames)
}
