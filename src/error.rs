// error.rs - Error types
//
// Depth queries and frame preconditions fail softly: callers log and skip.
// Only configuration errors ever reach the host.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DepthError {
    #[error("coordinate ({u}, {v}) is outside the normalized view range")]
    OutOfRange { u: f32, v: f32 },

    #[error("depth buffer holds {got} samples, expected {expected}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("depth frame {w}x{h} is too large")]
    TooLarge { w: u32, h: u32 },

    #[error("depth query failed: {0}")]
    Query(String),
}

/// Reasons a frame is skipped. None of these are fatal; the next frame retries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("no active XR session")]
    NoSession,

    #[error("reference space not available")]
    NoReferenceSpace,

    #[error("hit-test source not ready")]
    NoHitTestSource,

    #[error("viewer pose not available")]
    NoViewerPose,

    #[error("depth information not available")]
    NoDepth,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("heatmap min_seed ({min}) must be below max_seed ({max})")]
    DepthSeeds { min: f32, max: f32 },

    #[error("unknown demo `{0}`")]
    UnknownDemo(String),
}
