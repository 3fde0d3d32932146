//! Digit dataset loading and partitioning.
//!
//! - [`mnist`] reads the raw IDX files
//! - [`split`] carves train/validation/test partitions and builds tensor batches

pub mod mnist;
pub mod split;

pub use mnist::{HEIGHT, NUM_CLASSES, RawSplit, WIDTH, load_data};
pub use split::{DatasetSplits, DigitBatch, Partition, VALIDATION_SIZE, normalize};
