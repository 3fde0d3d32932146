//! Model-related error types.

use burn::record::RecorderError;
use thiserror::Error;

/// Errors that can occur while building or persisting a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model has no layers defined")]
    NoLayers,

    #[error("Model has no input shape defined")]
    NoInputShape,

    #[error("Invalid layer configuration: {message}")]
    InvalidLayerConfig { message: String },

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Failed to save or load model record")]
    Record(#[from] RecorderError),
}
