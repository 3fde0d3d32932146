//! Training utilities for the digit classifier.
//!
//! This module provides training functionality including:
//! - Sparse categorical cross-entropy loss
//! - Accuracy metric
//! - Training configuration (the "compile" step)
//! - Mini-batch SGD fit loop with per-epoch validation, and evaluation

mod config;
mod history;
mod loss;
mod metric;
mod trainer;

pub use config::TrainingConfig;
pub use history::{EpochMetrics, TrainingHistory};
pub use loss::Loss;
pub use metric::{Accuracy, correct_predictions};
pub use trainer::{Evaluation, TrainingResult, evaluate, fit};
