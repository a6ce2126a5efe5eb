//! Pose sourcing seam.

use formetric_core::{Error, FramePose, Result};

/// Capability producing the finite, ordered keypoint stream for one
/// recording.
///
/// Decoding video and running the pose model live behind this trait;
/// the pipeline only sees complete 17-keypoint frame poses in frame
/// order.
pub trait PoseSource {
    /// All frame poses for the recording, in frame order.
    fn frames(&mut self) -> Result<Vec<FramePose>>;
}

/// Pose source over an already-materialized frame list.
pub struct BufferedPoseSource {
    frames: Vec<FramePose>,
}

impl BufferedPoseSource {
    pub fn new(frames: Vec<FramePose>) -> Self {
        Self { frames }
    }
}

impl PoseSource for BufferedPoseSource {
    fn frames(&mut self) -> Result<Vec<FramePose>> {
        if self.frames.is_empty() {
            return Err(Error::InputUnavailable);
        }
        Ok(std::mem::take(&mut self.frames))
    }
}
