//! The "creating base model" stage: one end-to-end training run.

use std::path::{Path, PathBuf};

use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};

use crate::config::{RunConfig, create_directories, read_yaml};
use crate::data::{DatasetSplits, VALIDATION_SIZE, load_data};
use crate::errors::RunError;
use crate::model_graph::ModelGraphConfig;
use crate::training::{Evaluation, TrainingConfig, TrainingHistory, evaluate, fit};

/// Stage name written to the running log.
pub const STAGE: &str = "creating base model";

/// Artifacts of a finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// File the trained model was written to.
    pub model_path: PathBuf,
    pub history: TrainingHistory,
    /// Loss and accuracy on the test partition.
    pub test: Evaluation,
}

/// One training-and-evaluation pass over the digit dataset.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    config: RunConfig,
    model: ModelGraphConfig,
    training: TrainingConfig,
}

impl TrainingRun {
    /// A run of the fixed base model with the fixed training setup.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            model: ModelGraphConfig::base_model(),
            training: TrainingConfig::default(),
        }
    }

    /// Reads `config_path` and prepares a run from it.
    pub fn from_config_file(config_path: &Path) -> Result<Self, RunError> {
        Ok(Self::new(read_yaml(config_path)?))
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn model_config(&self) -> &ModelGraphConfig {
        &self.model
    }

    pub fn training_config(&self) -> &TrainingConfig {
        &self.training
    }

    /// Load, seed, build, fit, save, evaluate. The first failure aborts.
    pub fn execute<B: AutodiffBackend>(&self, device: &B::Device) -> Result<RunOutcome, RunError> {
        // get data
        let (train_full, test) = load_data(&self.config.data.source_dir)?;
        let splits = DatasetSplits::new(train_full, test, VALIDATION_SIZE)?;

        // both the backend RNG and the shuffler are seeded from the same value
        B::seed(self.training.seed);

        let model = self.model.build::<B>(device)?;
        log::info!("base model summary: \n{}", model.summary());

        let result = fit(
            model,
            &splits.train,
            Some(&splits.valid),
            &self.training,
            device,
        );

        let model_dir = self.config.artifacts.model_dir_path();
        create_directories(&[&model_dir])?;

        let model_path = result
            .model
            .save(&self.config.artifacts.model_file_path())?;
        log::info!(
            "base model is saved at {} (in place of {})",
            model_path.display(),
            model_path.with_extension("h5").display()
        );

        let test = evaluate(
            &result.model.valid(),
            &splits.test,
            self.training.loss,
            self.training.batch_size,
            device,
        );
        log::info!("evaluation metrics {test}");

        Ok(RunOutcome {
            model_path,
            history: result.history,
            test,
        })
    }
}

/// Runs the stage from a configuration file on backend `B`.
pub fn run_from_config_file<B: AutodiffBackend>(
    config_path: &Path,
    device: &B::Device,
) -> Result<RunOutcome, RunError> {
    TrainingRun::from_config_file(config_path)?.execute::<B>(device)
}

/// Logs the start and completion of `stage` around `f`.
///
/// A failure is logged with its full cause chain and returned unchanged.
pub fn run_stage<T, E, F>(stage: &str, f: F) -> Result<T, E>
where
    E: std::error::Error,
    F: FnOnce() -> Result<T, E>,
{
    log::info!("\n********************");
    log::info!(">>>>> stage {stage} started <<<<<");

    match f() {
        Ok(value) => {
            log::info!(">>>>> stage {stage} completed!<<<<<\n");
            Ok(value)
        }
        Err(err) => {
            log::error!("{}", error_chain(&err));
            Err(err)
        }
    }
}

/// `err` followed by each of its sources, one per line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    out
}
