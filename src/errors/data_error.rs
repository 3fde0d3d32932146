use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or partitioning the digit dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Dataset file {} is unavailable", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad IDX magic number in {}: expected {expected:#010x}, got {actual:#010x}", .path.display())]
    BadMagic {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },

    #[error("Unexpected image size in {}: expected {expected_rows}x{expected_cols}, got {rows}x{cols}", .path.display())]
    BadImageSize {
        path: PathBuf,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{images} images but {labels} labels in split `{split}`")]
    CountMismatch {
        split: &'static str,
        images: usize,
        labels: usize,
    },

    #[error("Label {label} at index {index} is outside 0..{num_classes}")]
    LabelOutOfRange {
        index: usize,
        label: u8,
        num_classes: usize,
    },

    #[error("Training set has {available} examples, need more than {requested} for validation")]
    PartitionTooSmall { available: usize, requested: usize },
}
