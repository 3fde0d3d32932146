//! Per-epoch metrics collected by [`fit`](super::fit).

use std::fmt;
use std::time::Duration;

/// Metrics of one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub loss: f64,
    pub accuracy: f64,
    pub val_loss: Option<f64>,
    pub val_accuracy: Option<f64>,
    pub duration: Duration,
}

impl fmt::Display for EpochMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}s - loss: {:.4} - accuracy: {:.4}",
            self.duration.as_secs_f64(),
            self.loss,
            self.accuracy
        )?;
        if let (Some(val_loss), Some(val_accuracy)) = (self.val_loss, self.val_accuracy) {
            write!(
                f,
                " - val_loss: {val_loss:.4} - val_accuracy: {val_accuracy:.4}"
            )?;
        }
        Ok(())
    }
}

/// Metrics of every epoch of a fit, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn with_capacity(epochs: usize) -> Self {
        Self {
            epochs: Vec::with_capacity(epochs),
        }
    }

    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn epochs(&self) -> &[EpochMetrics] {
        &self.epochs
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// Training loss of each epoch.
    pub fn loss(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.loss).collect()
    }

    /// Validation accuracy of each validated epoch.
    pub fn val_accuracy(&self) -> Vec<f64> {
        self.epochs.iter().filter_map(|m| m.val_accuracy).collect()
    }
}
