//! Error types for the Formetric system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no frames available for analysis")]
    InputUnavailable,

    #[error("no reference sequence for exercise '{exercise}'")]
    ReferenceNotFound { exercise: String },

    #[error("invalid pose: expected {expected} keypoints, got {actual}")]
    InvalidPose { expected: usize, actual: usize },

    #[error("analysis run ended before producing a report")]
    Incomplete,

    #[error("reference library error: {0}")]
    Library(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Library(e.to_string())
    }
}
