//! Run configuration read from `configs/config.yaml`.
//!
//! Every key is optional; missing keys fall back to the fixed layout
//! (`artifacts/models/base_model`, MNIST files under `data/mnist`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub artifacts: ArtifactsConfig,
    pub data: DataConfig,
}

/// Where trained models are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub artifacts_dir: PathBuf,
    pub model_dir: PathBuf,
    pub base_model_name: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("artifacts"),
            model_dir: PathBuf::from("models"),
            base_model_name: "base_model".to_string(),
        }
    }
}

impl ArtifactsConfig {
    /// Directory holding the saved model, e.g. `artifacts/models`.
    pub fn model_dir_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.model_dir)
    }

    /// Model path without extension; the recorder appends its own.
    pub fn model_file_path(&self) -> PathBuf {
        self.model_dir_path().join(&self.base_model_name)
    }
}

/// Location of the MNIST IDX files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data").join("mnist"),
        }
    }
}

/// Reads and parses a YAML configuration file.
pub fn read_yaml(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // serde_yaml rejects an empty document, treat it as all defaults
    let config = if content.trim().is_empty() {
        RunConfig::default()
    } else {
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    log::info!("yaml file: {} loaded successfully", path.display());
    Ok(config)
}

/// Creates each directory (and its parents). Existing directories are fine.
pub fn create_directories<P: AsRef<Path>>(paths: &[P]) -> Result<(), ConfigError> {
    for path in paths {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("created directory at: {}", path.display());
    }
    Ok(())
}
