//! Fundamental skeletal types for the Formetric system.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 17-joint skeletal keypoint definition (COCO format)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Keypoint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Keypoint {
    pub const COUNT: usize = 17;

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEye),
            2 => Some(Self::RightEye),
            3 => Some(Self::LeftEar),
            4 => Some(Self::RightEar),
            5 => Some(Self::LeftShoulder),
            6 => Some(Self::RightShoulder),
            7 => Some(Self::LeftElbow),
            8 => Some(Self::RightElbow),
            9 => Some(Self::LeftWrist),
            10 => Some(Self::RightWrist),
            11 => Some(Self::LeftHip),
            12 => Some(Self::RightHip),
            13 => Some(Self::LeftKnee),
            14 => Some(Self::RightKnee),
            15 => Some(Self::LeftAnkle),
            16 => Some(Self::RightAnkle),
            _ => None,
        }
    }
}

/// Body side used for single-side metric extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodySide {
    Left,
    Right,
}

impl BodySide {
    pub fn shoulder(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftShoulder,
            Self::Right => Keypoint::RightShoulder,
        }
    }

    pub fn elbow(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftElbow,
            Self::Right => Keypoint::RightElbow,
        }
    }

    pub fn wrist(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftWrist,
            Self::Right => Keypoint::RightWrist,
        }
    }

    pub fn hip(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftHip,
            Self::Right => Keypoint::RightHip,
        }
    }

    pub fn knee(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftKnee,
            Self::Right => Keypoint::RightKnee,
        }
    }

    pub fn ankle(&self) -> Keypoint {
        match self {
            Self::Left => Keypoint::LeftAnkle,
            Self::Right => Keypoint::RightAnkle,
        }
    }
}

/// 2D position in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Keypoint detection with confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointDetection {
    pub keypoint: Keypoint,
    pub position: Position2D,
    pub confidence: f32,
}

impl KeypointDetection {
    pub fn new(keypoint: Keypoint, position: Position2D, confidence: f32) -> Self {
        Self {
            keypoint,
            position,
            confidence,
        }
    }
}

/// Complete pose for one time-indexed frame, all 17 keypoints.
///
/// Detections are stored in canonical COCO order so lookups by
/// [`Keypoint`] are direct indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePose {
    keypoints: [KeypointDetection; Keypoint::COUNT],
}

impl FramePose {
    pub fn new(keypoints: [KeypointDetection; Keypoint::COUNT]) -> Self {
        debug_assert!(keypoints
            .iter()
            .enumerate()
            .all(|(i, kp)| kp.keypoint as usize == i));
        Self { keypoints }
    }

    /// Build from an unordered detection list; the list must carry each of the
    /// 17 keypoints exactly once.
    pub fn from_detections(detections: &[KeypointDetection]) -> Result<Self> {
        if detections.len() != Keypoint::COUNT {
            return Err(Error::InvalidPose {
                expected: Keypoint::COUNT,
                actual: detections.len(),
            });
        }

        let mut slots: [Option<KeypointDetection>; Keypoint::COUNT] = [None; Keypoint::COUNT];
        for det in detections {
            let idx = det.keypoint as usize;
            if slots[idx].replace(*det).is_some() {
                return Err(Error::InvalidPose {
                    expected: Keypoint::COUNT,
                    actual: detections.len(),
                });
            }
        }

        let mut keypoints = [detections[0]; Keypoint::COUNT];
        for (idx, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(det) => keypoints[idx] = det,
                None => {
                    return Err(Error::InvalidPose {
                        expected: Keypoint::COUNT,
                        actual: detections.len(),
                    })
                }
            }
        }

        Ok(Self { keypoints })
    }

    pub fn get(&self, keypoint: Keypoint) -> &KeypointDetection {
        &self.keypoints[keypoint as usize]
    }

    pub fn keypoints(&self) -> &[KeypointDetection; Keypoint::COUNT] {
        &self.keypoints
    }
}

/// Single-side view of the joints used for metric extraction.
///
/// `min_confidence` is the minimum over the shoulder, hip, knee, and
/// ankle detections; the arm joints do not gate frame acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideKeypoints {
    pub side: BodySide,
    pub shoulder: Position2D,
    pub elbow: Position2D,
    pub wrist: Position2D,
    pub hip: Position2D,
    pub knee: Position2D,
    pub ankle: Position2D,
    pub min_confidence: f32,
}

impl SideKeypoints {
    pub fn from_pose(pose: &FramePose, side: BodySide) -> Self {
        let shoulder = pose.get(side.shoulder());
        let hip = pose.get(side.hip());
        let knee = pose.get(side.knee());
        let ankle = pose.get(side.ankle());

        let min_confidence = shoulder
            .confidence
            .min(hip.confidence)
            .min(knee.confidence)
            .min(ankle.confidence);

        Self {
            side,
            shoulder: shoulder.position,
            elbow: pose.get(side.elbow()).position,
            wrist: pose.get(side.wrist()).position,
            hip: hip.position,
            knee: knee.position,
            ankle: ankle.position,
            min_confidence,
        }
    }
}
