//! Error types for every stage of a training run.

mod config_error;
mod data_error;
mod model_error;
mod run_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use model_error::ModelError;
pub use run_error::RunError;
