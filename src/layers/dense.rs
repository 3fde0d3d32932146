//! Dense (fully connected) layer implementation.

use crate::layers::Activation;
use burn::{
    module::{Module, Param},
    nn::{Initializer, Linear, LinearConfig},
    tensor::{Tensor, backend::Backend},
};

/// Configuration for a Dense layer.
#[derive(Debug, Clone)]
pub struct DenseConfig {
    /// Layer name shown in the model summary.
    pub name: String,
    /// Number of input features.
    pub input_size: usize,
    /// Number of output features.
    pub output_size: usize,
    /// Activation function to apply after the linear transformation.
    pub activation: Activation,
}

impl DenseConfig {
    /// Creates a new DenseConfig.
    pub fn new(name: impl Into<String>, input_size: usize, output_size: usize) -> Self {
        Self {
            name: name.into(),
            input_size,
            output_size,
            activation: Activation::None,
        }
    }

    /// Sets the activation function.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Initializes the Dense layer with the given device.
    ///
    /// Weights are drawn Glorot-uniform from the backend RNG, so a seeded
    /// backend yields identical layers. Biases start at zero.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Dense<B> {
        let mut linear = LinearConfig::new(self.input_size, self.output_size)
            .with_initializer(Initializer::XavierUniform { gain: 1.0 })
            .init(device);
        linear.bias = Some(Param::from_tensor(Tensor::zeros(
            [self.output_size],
            device,
        )));

        Dense {
            linear,
            name: self.name.clone(),
            input_size: self.input_size,
            output_size: self.output_size,
            activation_id: self.activation.to_id(),
        }
    }
}

/// A dense (fully connected) layer with optional activation.
///
/// It performs: output = activation(input @ weights + bias)
#[derive(Module, Debug)]
pub struct Dense<B: Backend> {
    /// The underlying linear transformation.
    linear: Linear<B>,
    /// Layer name (constant metadata).
    name: String,
    /// Input size (constant metadata).
    input_size: usize,
    /// Output size (constant metadata).
    output_size: usize,
    /// Activation function ID, see [`Activation::to_id`].
    activation_id: u8,
}

impl<B: Backend> Dense<B> {
    /// Performs the forward pass.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let output = self.linear.forward(input);
        Activation::from_id(self.activation_id).apply(output)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the input size of this layer.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Returns the output size of this layer.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Returns the activation function.
    pub fn activation(&self) -> Activation {
        Activation::from_id(self.activation_id)
    }

    /// Number of trainable values (weights plus bias).
    pub fn param_count(&self) -> usize {
        self.linear.num_params()
    }

    /// Extracts the weights as a 2D vector (shape: [output_size, input_size]).
    pub fn weights_to_vec(&self) -> Vec<Vec<f32>> {
        let weight_tensor = self.linear.weight.val();
        let flat: Vec<f32> = weight_tensor
            .to_data()
            .convert::<f32>()
            .to_vec()
            .unwrap_or_default();

        // Burn stores linear weights as [input_size, output_size]
        let mut result = vec![vec![0.0f32; self.input_size]; self.output_size];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = flat.get(i + j * self.output_size).copied().unwrap_or(0.0);
            }
        }
        result
    }

    /// Extracts the bias as a 1D vector.
    pub fn bias_to_vec(&self) -> Vec<f32> {
        match &self.linear.bias {
            Some(bias) => bias
                .val()
                .to_data()
                .convert::<f32>()
                .to_vec()
                .unwrap_or_default(),
            None => vec![0.0; self.output_size],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_dense_config_creation() {
        let config =
            DenseConfig::new("hiddenLayer1", 10, 5).with_activation(Activation::LeakyRelu);

        assert_eq!(config.name, "hiddenLayer1");
        assert_eq!(config.input_size, 10);
        assert_eq!(config.output_size, 5);
        assert_eq!(config.activation, Activation::LeakyRelu);
    }

    #[test]
    fn test_dense_layer_creation() {
        let device = <TestBackend as Backend>::Device::default();
        let dense: Dense<TestBackend> = DenseConfig::new("outputLayer", 4, 2)
            .with_activation(Activation::Softmax)
            .init(&device);

        assert_eq!(dense.name(), "outputLayer");
        assert_eq!(dense.input_size(), 4);
        assert_eq!(dense.output_size(), 2);
        assert_eq!(dense.activation(), Activation::Softmax);
    }

    #[test]
    fn test_dense_forward_shape() {
        let device = <TestBackend as Backend>::Device::default();
        let dense: Dense<TestBackend> = DenseConfig::new("dense", 4, 2).init(&device);

        let input = Tensor::<TestBackend, 2>::zeros([3, 4], &device);
        let output = dense.forward(input);

        assert_eq!(output.dims(), [3, 2]);
    }

    #[test]
    fn test_dense_param_count() {
        let device = <TestBackend as Backend>::Device::default();
        let dense: Dense<TestBackend> = DenseConfig::new("hiddenLayer1", 784, 300).init(&device);

        assert_eq!(dense.param_count(), 784 * 300 + 300);
    }

    #[test]
    fn test_dense_bias_starts_at_zero() {
        let device = <TestBackend as Backend>::Device::default();
        let dense: Dense<TestBackend> = DenseConfig::new("hiddenLayer1", 784, 300).init(&device);

        let bias = dense.bias_to_vec();
        assert_eq!(bias.len(), 300);
        assert!(bias.iter().all(|b| *b == 0.0));
        assert!(dense.weights_to_vec().iter().flatten().any(|w| *w != 0.0));
    }

    #[test]
    fn test_dense_weights_extraction() {
        let device = <TestBackend as Backend>::Device::default();
        let dense: Dense<TestBackend> = DenseConfig::new("dense", 3, 2).init(&device);

        let weights = dense.weights_to_vec();
        let bias = dense.bias_to_vec();

        assert_eq!(weights.len(), 2); // output_size rows
        assert_eq!(weights[0].len(), 3); // input_size columns
        assert_eq!(bias.len(), 2); // output_size
    }
}
