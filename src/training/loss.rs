//! Loss functions for training.

use burn::tensor::{Int, Tensor, backend::Backend};

/// Probabilities are clipped into `[EPSILON, 1 - EPSILON]` before the log.
const EPSILON: f32 = 1e-7;

/// Supported loss functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loss {
    /// Cross entropy between class probabilities and integer labels.
    SparseCategoricalCrossEntropy,
}

impl Loss {
    /// Computes the mean loss of `predictions` (`[batch, classes]`
    /// probabilities) against `targets` (`[batch]` class indices).
    pub fn compute<B: Backend>(
        &self,
        predictions: Tensor<B, 2>,
        targets: Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        match self {
            Loss::SparseCategoricalCrossEntropy => {
                // SCCE = -mean(log(p[target]))
                let [batch_size, _] = predictions.dims();
                let log_p = predictions.clamp(EPSILON, 1.0 - EPSILON).log();
                let picked = log_p.gather(1, targets.reshape([batch_size, 1]));
                picked.neg().mean()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_scce_confident_correct_prediction() {
        let device = <TestBackend as Backend>::Device::default();
        let predictions =
            Tensor::<TestBackend, 2>::from_floats([[0.98, 0.01, 0.01], [0.01, 0.01, 0.98]], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0, 2], &device);

        let loss: f32 = Loss::SparseCategoricalCrossEntropy
            .compute(predictions, targets)
            .into_scalar();

        assert!((loss - (-(0.98f32).ln())).abs() < 1e-5);
    }

    #[test]
    fn test_scce_uniform_prediction() {
        let device = <TestBackend as Backend>::Device::default();
        let predictions = Tensor::<TestBackend, 2>::full([4, 10], 0.1, &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0, 3, 5, 9], &device);

        let loss: f32 = Loss::SparseCategoricalCrossEntropy
            .compute(predictions, targets)
            .into_scalar();

        assert!((loss - 10.0f32.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_scce_zero_probability_is_finite() {
        let device = <TestBackend as Backend>::Device::default();
        let predictions = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0]], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([1], &device);

        let loss: f32 = Loss::SparseCategoricalCrossEntropy
            .compute(predictions, targets)
            .into_scalar();

        assert!(loss.is_finite());
        assert!((loss - (-(EPSILON.ln()))).abs() < 1e-2);
    }
}
