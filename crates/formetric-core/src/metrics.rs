//! Named movement metrics extracted per frame and collected per video.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier for one extracted metric.
///
/// The canonical order in [`MetricId::ALL`] is shared by every sequence so
/// that any two sequences being compared stay index-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricId {
    #[serde(rename = "torso_angle")]
    TorsoAngle,
    #[serde(rename = "spine_curvature")]
    SpineCurvature,
    #[serde(rename = "armpit_angle")]
    ArmpitAngle,
    #[serde(rename = "shoulder_vec_norm")]
    ShoulderVec,
    #[serde(rename = "elbow_vec_norm")]
    ElbowVec,
    #[serde(rename = "hip_vec_norm")]
    HipVec,
    #[serde(rename = "knee_vec_norm")]
    KneeVec,
}

impl MetricId {
    /// Every metric, in canonical order.
    pub const ALL: [MetricId; 7] = [
        MetricId::TorsoAngle,
        MetricId::SpineCurvature,
        MetricId::ArmpitAngle,
        MetricId::ShoulderVec,
        MetricId::ElbowVec,
        MetricId::HipVec,
        MetricId::KneeVec,
    ];

    /// Sample dimensionality: 1 for angles, 2 for limb vectors.
    pub fn dimensions(&self) -> usize {
        match self {
            Self::TorsoAngle | Self::SpineCurvature | Self::ArmpitAngle => 1,
            Self::ShoulderVec | Self::ElbowVec | Self::HipVec | Self::KneeVec => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TorsoAngle => "torso_angle",
            Self::SpineCurvature => "spine_curvature",
            Self::ArmpitAngle => "armpit_angle",
            Self::ShoulderVec => "shoulder_vec_norm",
            Self::ElbowVec => "elbow_vec_norm",
            Self::HipVec => "hip_vec_norm",
            Self::KneeVec => "knee_vec_norm",
        }
    }
}

/// One metric sample: a scalar angle or a planar limb vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Scalar(f64),
    Planar([f64; 2]),
}

impl MetricValue {
    pub fn dimensions(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Planar(_) => 2,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Planar(_) => None,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Planar(v) => v.to_vec(),
        }
    }
}

/// Named metric record computed from one detected frame.
///
/// Angles are in degrees; vectors are torso-length-normalized and unit-less.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    pub torso_angle: f64,
    pub spine_curvature: f64,
    pub armpit_angle: f64,
    pub shoulder_vec: [f64; 2],
    pub elbow_vec: [f64; 2],
    pub hip_vec: [f64; 2],
    pub knee_vec: [f64; 2],
}

impl FrameMetrics {
    pub fn value(&self, metric: MetricId) -> MetricValue {
        match metric {
            MetricId::TorsoAngle => MetricValue::Scalar(self.torso_angle),
            MetricId::SpineCurvature => MetricValue::Scalar(self.spine_curvature),
            MetricId::ArmpitAngle => MetricValue::Scalar(self.armpit_angle),
            MetricId::ShoulderVec => MetricValue::Planar(self.shoulder_vec),
            MetricId::ElbowVec => MetricValue::Planar(self.elbow_vec),
            MetricId::HipVec => MetricValue::Planar(self.hip_vec),
            MetricId::KneeVec => MetricValue::Planar(self.knee_vec),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.torso_angle, self.spine_curvature, self.armpit_angle]
            .iter()
            .all(|v| v.is_finite())
            && [self.shoulder_vec, self.elbow_vec, self.hip_vec, self.knee_vec]
                .iter()
                .all(|v| v[0].is_finite() && v[1].is_finite())
    }
}

/// Result of metric extraction for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricFrame {
    /// Keypoint confidence too low or geometry degenerate; recorded as null.
    Undetected,
    Detected(FrameMetrics),
}

impl MetricFrame {
    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }

    pub fn metrics(&self) -> Option<&FrameMetrics> {
        match self {
            Self::Detected(m) => Some(m),
            Self::Undetected => None,
        }
    }
}

/// Per-metric value streams for one video, in frame order.
///
/// Built once per video pass and never mutated afterwards. The frame
/// order is the time axis; it is never reordered. Undetected frames are
/// stored as `None` and excluded from statistics by the accessors, never
/// imputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSequence {
    series: HashMap<MetricId, Vec<Option<MetricValue>>>,
}

impl MetricSequence {
    /// Collect per-frame metric records into per-metric streams.
    pub fn from_frames(frames: &[MetricFrame]) -> Self {
        let mut series: HashMap<MetricId, Vec<Option<MetricValue>>> = MetricId::ALL
            .iter()
            .map(|&m| (m, Vec::with_capacity(frames.len())))
            .collect();

        for frame in frames {
            for &metric in MetricId::ALL.iter() {
                let value = frame.metrics().map(|m| m.value(metric));
                series.entry(metric).or_default().push(value);
            }
        }

        Self { series }
    }

    pub(crate) fn insert_series(&mut self, metric: MetricId, values: Vec<Option<MetricValue>>) {
        self.series.insert(metric, values);
    }

    /// Frame-order samples for one metric; a missing metric is an empty
    /// sequence, never an error.
    pub fn samples(&self, metric: MetricId) -> &[Option<MetricValue>] {
        self.series.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Null-filtered sample vectors for one metric, frame order preserved.
    pub fn valid_points(&self, metric: MetricId) -> Vec<Vec<f64>> {
        self.samples(metric)
            .iter()
            .flatten()
            .map(MetricValue::to_vec)
            .collect()
    }

    /// Null-filtered scalar samples for one metric.
    pub fn valid_scalars(&self, metric: MetricId) -> Vec<f64> {
        self.samples(metric)
            .iter()
            .flatten()
            .filter_map(MetricValue::as_scalar)
            .collect()
    }

    /// Number of sampled frames (including undetected ones).
    pub fn frame_count(&self) -> usize {
        MetricId::ALL
            .iter()
            .map(|&m| self.samples(m).len())
            .max()
            .unwrap_or(0)
    }

    /// Number of frames with a valid sample for `metric`.
    pub fn detected_count(&self, metric: MetricId) -> usize {
        self.samples(metric).iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }
}

/// Precomputed golden sequence for one exercise.
///
/// The JSON layout carries the metric-name list plus one row of
/// (value | null) entries per frame, aligned with that list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub exercise: String,
    pub metrics: Vec<MetricId>,
    pub frames: Vec<Vec<Option<MetricValue>>>,
}

impl ReferenceEntry {
    pub fn to_sequence(&self) -> MetricSequence {
        let mut sequence = MetricSequence::default();
        for (col, &metric) in self.metrics.iter().enumerate() {
            let values = self
                .frames
                .iter()
                .map(|row| row.get(col).copied().flatten())
                .collect();
            sequence.insert_series(metric, values);
        }
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics(angle: f64) -> FrameMetrics {
        FrameMetrics {
            torso_angle: angle,
            spine_curvature: angle * 0.1,
            armpit_angle: angle * 0.5,
            shoulder_vec: [0.0, -1.0],
            elbow_vec: [0.2, 0.4],
            hip_vec: [0.0, 1.0],
            knee_vec: [0.1, 0.9],
        }
    }

    #[test]
    fn test_sequence_preserves_frame_order_and_nulls() {
        let frames = vec![
            MetricFrame::Detected(sample_metrics(170.0)),
            MetricFrame::Undetected,
            MetricFrame::Detected(sample_metrics(150.0)),
        ];
        let sequence = MetricSequence::from_frames(&frames);

        assert_eq!(sequence.frame_count(), 3);
        assert_eq!(sequence.detected_count(MetricId::TorsoAngle), 2);

        let samples = sequence.samples(MetricId::TorsoAngle);
        assert_eq!(samples[0], Some(MetricValue::Scalar(170.0)));
        assert_eq!(samples[1], None);
        assert_eq!(samples[2], Some(MetricValue::Scalar(150.0)));
    }

    #[test]
    fn test_valid_points_filters_nulls() {
        let frames = vec![
            MetricFrame::Undetected,
            MetricFrame::Detected(sample_metrics(90.0)),
        ];
        let sequence = MetricSequence::from_frames(&frames);

        let points = sequence.valid_points(MetricId::ShoulderVec);
        assert_eq!(points, vec![vec![0.0, -1.0]]);

        let scalars = sequence.valid_scalars(MetricId::SpineCurvature);
        assert_eq!(scalars, vec![9.0]);
    }

    #[test]
    fn test_missing_metric_is_empty() {
        let sequence = MetricSequence::default();
        assert!(sequence.samples(MetricId::KneeVec).is_empty());
        assert!(sequence.valid_points(MetricId::KneeVec).is_empty());
    }

    #[test]
    fn test_metric_value_untagged_serde() {
        let scalar: MetricValue = serde_json::from_str("42.5").unwrap();
        assert_eq!(scalar, MetricValue::Scalar(42.5));

        let planar: MetricValue = serde_json::from_str("[0.5, -0.25]").unwrap();
        assert_eq!(planar, MetricValue::Planar([0.5, -0.25]));
    }

    #[test]
    fn test_reference_entry_roundtrip() {
        let raw = r#"{
            "exercise": "squat",
            "metrics": ["spine_curvature", "knee_vec_norm"],
            "frames": [
                [12.0, [0.1, 0.9]],
                [null, null],
                [14.5, [0.2, 0.8]]
            ]
        }"#;

        let entry: ReferenceEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.exercise, "squat");
        assert_eq!(
            entry.metrics,
            vec![MetricId::SpineCurvature, MetricId::KneeVec]
        );

        let sequence = entry.to_sequence();
        assert_eq!(sequence.valid_scalars(MetricId::SpineCurvature), vec![12.0, 14.5]);
        assert_eq!(
            sequence.valid_points(MetricId::KneeVec),
            vec![vec![0.1, 0.9], vec![0.2, 0.8]]
        );
        // Metrics absent from the entry stay empty.
        assert!(sequence.samples(MetricId::TorsoAngle).is_empty());
    }

    #[test]
    fn test_metric_dimensions() {
        for metric in MetricId::ALL {
            let dims = metric.dimensions();
            assert!(dims == 1 || dims == 2);
        }
        assert_eq!(MetricId::SpineCurvature.dimensions(), 1);
        assert_eq!(MetricId::ShoulderVec.dimensions(), 2);
    }

    #[test]
    fn test_metric_names_match_wire_format() {
        for metric in MetricId::ALL {
            let json = serde_json::to_value(metric).unwrap();
            assert_eq!(json, metric.name());
        }
    }
}
