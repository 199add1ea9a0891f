use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems, surfaced at load time and never during an
/// inspection.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid stream_url '{url}': {reason}")]
    InvalidStreamUrl { url: String, reason: String },

    #[error("img_width and img_height must both be positive")]
    InvalidDimensions,

    #[error("model_path must not be empty")]
    EmptyModelPath,
}

/// Frame acquisition failures: network, bad HTTP status, or an image the
/// decoder cannot make sense of.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Frame request failed: {0}")]
    Request(String),

    #[error("Camera stream returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode camera frame: {0}")]
    Decode(String),
}

/// Classifier failures, split between loading the model and running it.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: expected {expected} classes, got {actual}")]
    OutputShape { expected: usize, actual: usize },
}

/// Any error that can end an in-flight inspection. Wraps the stage errors
/// transparently so the operator-facing message keeps the original detail.
#[derive(Debug, Error)]
pub enum InspectionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
