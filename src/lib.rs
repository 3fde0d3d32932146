//! # base-model
//!
//! Trains the base handwritten-digit classifier: a 784-300-100-10
//! fully-connected network with leaky ReLU hidden activations and a softmax
//! output, fitted on MNIST with plain SGD.
//!
//! A run loads the dataset, holds out the first 5000 training images for
//! validation, rescales pixels to `[0, 1]`, trains for 10 epochs, saves the
//! model under `artifacts/models` and logs the test metrics to
//! `logs/running_logs.log`.
//!
//! ## Example
//!
//! ```
//! use base_model::prelude::*;
//! use burn::backend::NdArray;
//!
//! type Backend = NdArray;
//!
//! let device = <Backend as burn::tensor::backend::Backend>::Device::default();
//!
//! let model: ModelGraph<Backend> = ModelGraphConfig::base_model()
//!     .build(&device)
//!     .expect("Failed to build model");
//!
//! assert_eq!(model.param_count(), 266_610);
//! assert!(model.summary().contains("hiddenLayer1 (Dense)"));
//! ```

pub mod config;
pub mod data;
pub mod errors;
pub mod layers;
pub mod logging;
pub mod model_graph;
pub mod run;
pub mod training;

// Re-exports for convenience
pub use errors::{ConfigError, DataError, ModelError, RunError};
pub use layers::activation::Activation;
pub use model_graph::ModelGraph;
pub use run::{STAGE, TrainingRun};
pub use training::{Loss, TrainingConfig};

/// Backend type alias for CPU training with autodiff support.
pub type Backend = burn::backend::Autodiff<burn::backend::NdArray>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{RunConfig, create_directories, read_yaml};
    pub use crate::data::{DatasetSplits, Partition, load_data};
    pub use crate::errors::{ConfigError, DataError, ModelError, RunError};
    pub use crate::layers::activation::Activation;
    pub use crate::model_graph::{ModelGraph, ModelGraphConfig};
    pub use crate::run::{STAGE, TrainingRun, run_stage};
    pub use crate::training::{Loss, TrainingConfig, evaluate, fit};
    pub use crate::Backend;
}
