//! Training configuration.

use super::Loss;

/// Seed shared by the backend RNG and the batch shuffler.
pub const DEFAULT_SEED: u64 = 2021;

/// Configuration for model training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of training epochs.
    pub epochs: usize,
    /// Learning rate for the SGD optimizer.
    pub learning_rate: f64,
    /// Batch size for training and evaluation.
    pub batch_size: usize,
    /// Loss function to use.
    pub loss: Loss,
    /// Seed for shuffling the training partition.
    pub seed: u64,
    /// Whether to log per-epoch metrics.
    pub verbose: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            learning_rate: 1e-3,
            batch_size: 32,
            loss: Loss::SparseCategoricalCrossEntropy,
            seed: DEFAULT_SEED,
            verbose: true,
        }
    }
}

impl TrainingConfig {
    /// Creates a new TrainingConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of epochs.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Sets the loss function.
    pub fn loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }

    /// Sets the shuffling seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets whether to log progress.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 10);
        assert!((config.learning_rate - 1e-3).abs() < 1e-12);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.seed, 2021);
        assert_eq!(config.loss, Loss::SparseCategoricalCrossEntropy);
    }

    #[test]
    fn test_config_builder() {
        let config = TrainingConfig::new()
            .epochs(3)
            .learning_rate(0.05)
            .batch_size(8)
            .seed(7)
            .verbose(false);

        assert_eq!(config.epochs, 3);
        assert!((config.learning_rate - 0.05).abs() < 1e-12);
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.seed, 7);
        assert!(!config.verbose);
    }
}
