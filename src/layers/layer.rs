//! One entry of a sequential stack: a dense layer or a standalone activation.

use crate::layers::{Activation, Dense, DenseConfig};
use burn::{
    module::Module,
    tensor::{Tensor, backend::Backend},
};

/// Configuration of a layer following the input layer.
#[derive(Debug, Clone)]
pub enum LayerConfig {
    Dense(DenseConfig),
    Activation { name: String, activation: Activation },
}

impl LayerConfig {
    pub fn name(&self) -> &str {
        match self {
            LayerConfig::Dense(config) => &config.name,
            LayerConfig::Activation { name, .. } => name,
        }
    }

    /// Width of the rows this layer produces given `input_size` wide rows.
    pub fn output_size(&self, input_size: usize) -> usize {
        match self {
            LayerConfig::Dense(config) => config.output_size,
            LayerConfig::Activation { .. } => input_size,
        }
    }

    pub fn init<B: Backend>(&self, input_size: usize, device: &B::Device) -> Layer<B> {
        match self {
            LayerConfig::Dense(config) => Layer {
                name: config.name.clone(),
                dense: Some(config.init(device)),
                activation_id: Activation::None.to_id(),
                output_size: config.output_size,
            },
            LayerConfig::Activation { name, activation } => Layer {
                name: name.clone(),
                dense: None,
                activation_id: activation.to_id(),
                output_size: input_size,
            },
        }
    }
}

/// A sequential layer. Activation-only layers carry no parameters.
#[derive(Module, Debug)]
pub struct Layer<B: Backend> {
    name: String,
    dense: Option<Dense<B>>,
    activation_id: u8,
    output_size: usize,
}

impl<B: Backend> Layer<B> {
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        match &self.dense {
            Some(dense) => dense.forward(input),
            None => Activation::from_id(self.activation_id).apply(input),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type label used by the model summary (`Dense`, `LeakyReLU`, ...).
    pub fn layer_type(&self) -> &'static str {
        match &self.dense {
            Some(_) => "Dense",
            None => Activation::from_id(self.activation_id).layer_type(),
        }
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn param_count(&self) -> usize {
        self.dense.as_ref().map(Dense::param_count).unwrap_or(0)
    }

    pub fn as_dense(&self) -> Option<&Dense<B>> {
        self.dense.as_ref()
    }
}
