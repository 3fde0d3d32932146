//! Activation functions for neural network layers.

use burn::tensor::{Tensor, backend::Backend};

/// Slope applied to negative inputs by [`Activation::LeakyRelu`].
pub const LEAKY_RELU_SLOPE: f64 = 0.3;

/// Supported activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// No activation (identity function).
    #[default]
    None,
    /// Leaky ReLU: f(x) = x for x >= 0, else 0.3 * x
    LeakyRelu,
    /// Softmax normalization (across last dimension)
    Softmax,
}

impl Activation {
    /// Applies the activation function to a tensor.
    pub fn apply<B: Backend, const D: usize>(&self, tensor: Tensor<B, D>) -> Tensor<B, D> {
        match self {
            Activation::None => tensor,
            Activation::LeakyRelu => {
                burn::tensor::activation::leaky_relu(tensor, LEAKY_RELU_SLOPE)
            }
            Activation::Softmax => burn::tensor::activation::softmax(tensor, D - 1),
        }
    }

    /// Layer type shown in the model summary for a standalone activation layer.
    pub fn layer_type(&self) -> &'static str {
        match self {
            Activation::LeakyRelu => "LeakyReLU",
            Activation::None | Activation::Softmax => "Activation",
        }
    }

    /// Base name given to unnamed activation layers (`leaky_re_lu`, `leaky_re_lu_1`, ...).
    pub fn default_layer_name(&self) -> &'static str {
        match self {
            Activation::LeakyRelu => "leaky_re_lu",
            Activation::None | Activation::Softmax => "activation",
        }
    }

    /// Converts activation to a numeric ID for storage in Module.
    pub fn to_id(&self) -> u8 {
        match self {
            Activation::None => 0,
            Activation::LeakyRelu => 1,
            Activation::Softmax => 2,
        }
    }

    /// Creates an Activation from a numeric ID.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Activation::LeakyRelu,
            2 => Activation::Softmax,
            _ => Activation::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_activation_id_roundtrip() {
        let activations = [Activation::None, Activation::LeakyRelu, Activation::Softmax];
        for act in activations {
            assert_eq!(Activation::from_id(act.to_id()), act);
        }
    }

    #[test]
    fn test_standalone_layer_names() {
        assert_eq!(Activation::LeakyRelu.layer_type(), "LeakyReLU");
        assert_eq!(Activation::LeakyRelu.default_layer_name(), "leaky_re_lu");
        assert_eq!(Activation::Softmax.default_layer_name(), "activation");
    }

    #[test]
    fn test_leaky_relu_activation() {
        let device = <TestBackend as Backend>::Device::default();
        let input = Tensor::<TestBackend, 1>::from_floats([-2.0, -0.5, 0.0, 1.5], &device);
        let output = Activation::LeakyRelu.apply(input);
        let result: Vec<f32> = output.to_data().to_vec().unwrap();
        // negative inputs scaled by 0.3, positive unchanged
        assert!((result[0] - (-0.6)).abs() < 1e-6);
        assert!((result[1] - (-0.15)).abs() < 1e-6);
        assert!(result[2].abs() < 1e-6);
        assert!((result[3] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let device = <TestBackend as Backend>::Device::default();
        let input =
            Tensor::<TestBackend, 2>::from_floats([[1.0, 2.0, 3.0], [-1.0, 0.0, 10.0]], &device);
        let output = Activation::Softmax.apply(input);
        let result: Vec<f32> = output.to_data().to_vec().unwrap();

        for row in result.chunks(3) {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        }
        assert!(result[2] > result[1] && result[1] > result[0]);
    }
}
