//! Error types for the tracker and the detection pipeline.

use thiserror::Error;

/// Errors reported by [`ObjectTracker`](crate::tracker::ObjectTracker).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// Frame dimensions must both be positive.
    #[error("invalid frame size {width}x{height}: width and height must be positive")]
    InvalidFrameSize { width: u32, height: u32 },

    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(String),

    /// A detection in the batch has malformed geometry or confidence.
    /// The whole batch is rejected and no track was modified.
    #[error("invalid detection at index {index}: {reason}")]
    InvalidDetection { index: usize, reason: String },

    /// Allocating identities for this frame's new tracks would overflow the
    /// counter. The batch is rejected and no track was modified.
    #[error("cannot allocate {requested} track identities starting at {next_id}")]
    IdentitiesExhausted { next_id: u64, requested: usize },

    /// The optimal assignment solver failed on the similarity matrix.
    #[error("assignment solver failed: {0}")]
    Assignment(String),
}

/// Errors reported by [`TrackerPipeline`](crate::integration::TrackerPipeline).
#[derive(Debug, Error)]
pub enum PipelineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("detector failed")]
    Detector(#[source] E),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
