use thiserror::Error;

use super::{ConfigError, DataError, ModelError};

/// Any failure that aborts a training run.
///
/// Every stage error collapses into this type so the top-level guard can log
/// it once and hand it back to the caller unchanged.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
