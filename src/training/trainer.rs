//! Training loop implementation.

use std::fmt;
use std::time::Instant;

use super::{Accuracy, EpochMetrics, Loss, TrainingConfig, TrainingHistory};
use crate::data::Partition;
use crate::model_graph::ModelGraph;
use burn::{
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer, SgdConfig},
    tensor::{
        ElementConversion,
        backend::{AutodiffBackend, Backend},
    },
};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Training result containing the trained model and metrics.
#[derive(Debug)]
pub struct TrainingResult<B: AutodiffBackend> {
    /// The trained model.
    pub model: ModelGraph<B>,
    /// Metrics of every epoch.
    pub history: TrainingHistory,
}

/// Loss and accuracy over a whole partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.loss, self.accuracy)
    }
}

/// Trains `model` on `train` with mini-batch SGD.
///
/// The partition is reshuffled every epoch from an RNG seeded with
/// `config.seed`. When `valid` is given the model is evaluated on it after
/// every epoch.
pub fn fit<B: AutodiffBackend>(
    model: ModelGraph<B>,
    train: &Partition,
    valid: Option<&Partition>,
    config: &TrainingConfig,
    device: &B::Device,
) -> TrainingResult<B> {
    let mut optimizer = SgdConfig::new().init();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut indices: Vec<usize> = (0..train.len()).collect();
    let batch_size = config.batch_size.max(1);

    let mut current_model = model;
    let mut history = TrainingHistory::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let started = Instant::now();
        indices.shuffle(&mut rng);

        let mut loss_sum = 0.0;
        let mut accuracy = Accuracy::default();

        for chunk in indices.chunks(batch_size) {
            let batch = train.batch::<B>(chunk, device);

            // Forward pass
            let predictions = current_model.forward(batch.images);
            let loss = config
                .loss
                .compute(predictions.clone(), batch.targets.clone());

            let loss_value: f64 = loss.clone().into_scalar().elem();
            loss_sum += loss_value * chunk.len() as f64;
            accuracy.update(predictions, batch.targets);

            // Backward pass
            let grads = loss.backward();
            let grads_params = GradientsParams::from_grads(grads, &current_model);

            // Update model parameters
            current_model = optimizer.step(config.learning_rate, current_model, grads_params);
        }

        let validation = valid.map(|valid| {
            evaluate(
                &current_model.valid(),
                valid,
                config.loss,
                batch_size,
                device,
            )
        });

        let metrics = EpochMetrics {
            epoch,
            loss: if train.is_empty() {
                0.0
            } else {
                loss_sum / train.len() as f64
            },
            accuracy: accuracy.value(),
            val_loss: validation.map(|v| v.loss),
            val_accuracy: validation.map(|v| v.accuracy),
            duration: started.elapsed(),
        };

        if config.verbose {
            log::info!("Epoch {}/{} - {}", epoch, config.epochs, metrics);
        }
        history.push(metrics);
    }

    TrainingResult {
        model: current_model,
        history,
    }
}

/// Computes loss and accuracy of `model` over `partition`, batch by batch.
pub fn evaluate<B: Backend>(
    model: &ModelGraph<B>,
    partition: &Partition,
    loss: Loss,
    batch_size: usize,
    device: &B::Device,
) -> Evaluation {
    let mut loss_sum = 0.0;
    let mut accuracy = Accuracy::default();

    for batch in partition.sequential_batches::<B>(batch_size, device) {
        let size = batch.targets.dims()[0];
        let predictions = model.forward(batch.images);
        let batch_loss: f64 = loss
            .compute(predictions.clone(), batch.targets.clone())
            .into_scalar()
            .elem();

        loss_sum += batch_loss * size as f64;
        accuracy.update(predictions, batch.targets);
    }

    Evaluation {
        loss: if partition.is_empty() {
            0.0
        } else {
            loss_sum / partition.len() as f64
        },
        accuracy: accuracy.value(),
    }
}
