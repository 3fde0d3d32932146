//! Classification accuracy.

use burn::tensor::{ElementConversion, Int, Tensor, backend::Backend};

/// Number of rows of `predictions` whose arg-max equals the target label.
pub fn correct_predictions<B: Backend>(
    predictions: Tensor<B, 2>,
    targets: Tensor<B, 1, Int>,
) -> usize {
    let [batch_size, _] = predictions.dims();
    let predicted = predictions.argmax(1).reshape([batch_size]);
    let correct: i64 = predicted.equal(targets).int().sum().into_scalar().elem();
    correct.max(0) as usize
}

/// Running accuracy over several batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accuracy {
    correct: usize,
    total: usize,
}

impl Accuracy {
    pub fn update<B: Backend>(&mut self, predictions: Tensor<B, 2>, targets: Tensor<B, 1, Int>) {
        self.total += targets.dims()[0];
        self.correct += correct_predictions(predictions, targets);
    }

    /// Fraction of correct predictions, `0.0` before any update.
    pub fn value(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}
