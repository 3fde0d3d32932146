//! ModelGraph - the sequential container for the digit classifier.
//!
//! A `ModelGraph` is a flattening input layer followed by dense and
//! activation layers. It can print a layer summary and persist itself with
//! Burn's file recorders.

use std::path::{Path, PathBuf};

use crate::errors::ModelError;
use crate::layers::{Activation, DenseConfig, Flatten, FlattenConfig, Layer, LayerConfig};
use burn::{
    module::Module,
    record::{FileRecorder, FullPrecisionSettings, NamedMpkFileRecorder},
    tensor::{Tensor, backend::Backend},
};

const SUMMARY_WIDTH: usize = 65;
const SUMMARY_COLUMNS: [usize; 3] = [29, 26, 10];

/// Configuration for building a ModelGraph.
#[derive(Debug, Clone)]
pub struct ModelGraphConfig {
    /// Model name shown in the summary header.
    pub name: String,
    /// Input layer; a model without one cannot be built.
    pub input: Option<FlattenConfig>,
    /// Layer configurations, in order.
    pub layer_configs: Vec<LayerConfig>,
}

impl ModelGraphConfig {
    /// Creates an empty configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
            layer_configs: Vec::new(),
        }
    }

    /// The fixed 784-300-100-10 digit classifier.
    pub fn base_model() -> Self {
        Self::new("sequential")
            .flatten("inputLayer", 28, 28)
            .dense("hiddenLayer1", 300, Activation::None)
            .activation(Activation::LeakyRelu)
            .dense("hiddenLayer2", 100, Activation::None)
            .activation(Activation::LeakyRelu)
            .dense("outputLayer", 10, Activation::Softmax)
    }

    /// Sets the input layer flattening `height x width` images.
    pub fn flatten(mut self, name: impl Into<String>, height: usize, width: usize) -> Self {
        self.input = Some(FlattenConfig::new(name, height, width));
        self
    }

    /// Adds a dense layer to the configuration.
    pub fn dense(
        mut self,
        name: impl Into<String>,
        output_size: usize,
        activation: Activation,
    ) -> Self {
        let input_size = self.output_size();
        self.layer_configs.push(LayerConfig::Dense(
            DenseConfig::new(name, input_size, output_size).with_activation(activation),
        ));
        self
    }

    /// Adds a standalone activation layer named after its kind
    /// (`leaky_re_lu`, `leaky_re_lu_1`, ...).
    pub fn activation(mut self, activation: Activation) -> Self {
        let base = activation.default_layer_name();
        let taken = self
            .layer_configs
            .iter()
            .filter(|config| {
                matches!(config, LayerConfig::Activation { activation: a, .. }
                    if a.default_layer_name() == base)
            })
            .count();
        let name = match taken {
            0 => base.to_string(),
            n => format!("{base}_{n}"),
        };

        self.layer_configs
            .push(LayerConfig::Activation { name, activation });
        self
    }

    /// Width of the rows produced by the last configured layer.
    fn output_size(&self) -> usize {
        let input_size = self
            .input
            .as_ref()
            .map(|input| input.height * input.width)
            .unwrap_or(0);
        self.layer_configs
            .iter()
            .fold(input_size, |size, config| config.output_size(size))
    }

    /// Builds the ModelGraph with the given device.
    pub fn build<B: Backend>(&self, device: &B::Device) -> Result<ModelGraph<B>, ModelError> {
        let input = self.input.as_ref().ok_or(ModelError::NoInputShape)?;
        if input.height == 0 || input.width == 0 {
            return Err(ModelError::InvalidLayerConfig {
                message: format!(
                    "input layer `{}` has empty shape {}x{}",
                    input.name, input.height, input.width
                ),
            });
        }

        if self.layer_configs.is_empty() {
            return Err(ModelError::NoLayers);
        }

        let mut size = input.height * input.width;
        let mut layers = Vec::with_capacity(self.layer_configs.len());
        for config in &self.layer_configs {
            if let LayerConfig::Dense(dense) = config {
                if dense.input_size != size {
                    return Err(ModelError::ShapeMismatch {
                        expected: size,
                        actual: dense.input_size,
                    });
                }
                if dense.output_size == 0 {
                    return Err(ModelError::InvalidLayerConfig {
                        message: format!("dense layer `{}` has no units", dense.name),
                    });
                }
            }
            layers.push(config.init(size, device));
            size = config.output_size(size);
        }

        Ok(ModelGraph {
            name: self.name.clone(),
            input: input.init(),
            layers,
        })
    }
}

/// Sequential model: flatten, then each layer in order.
#[derive(Module, Debug)]
pub struct ModelGraph<B: Backend> {
    /// Model name (stored as constant).
    name: String,
    /// Input flattening layer.
    input: Flatten,
    /// The layers in sequence.
    layers: Vec<Layer<B>>,
}

impl<B: Backend> ModelGraph<B> {
    /// Performs a forward pass from `[batch, height, width]` images to
    /// `[batch, classes]` outputs.
    pub fn forward(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        let mut x = self.input.forward(images);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        x
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_shape(&self) -> [usize; 2] {
        self.input.input_shape()
    }

    /// Returns the output size of the model.
    pub fn output_size(&self) -> usize {
        self.layers
            .last()
            .map(|l| l.output_size())
            .unwrap_or_else(|| self.input.output_size())
    }

    /// Returns the number of layers, input layer included.
    pub fn num_layers(&self) -> usize {
        self.layers.len() + 1
    }

    pub fn layers(&self) -> &[Layer<B>] {
        &self.layers
    }

    /// Total number of trainable values.
    pub fn param_count(&self) -> usize {
        self.layers.iter().map(Layer::param_count).sum()
    }

    /// Renders a table of layers, output shapes and parameter counts.
    pub fn summary(&self) -> String {
        let rule = "_".repeat(SUMMARY_WIDTH);
        let double_rule = "=".repeat(SUMMARY_WIDTH);

        let mut rows = vec![summary_row(
            &format!("{} (Flatten)", self.input.name()),
            &format!("(None, {})", self.input.output_size()),
            "0",
        )];
        rows.extend(self.layers.iter().map(|layer| {
            summary_row(
                &format!("{} ({})", layer.name(), layer.layer_type()),
                &format!("(None, {})", layer.output_size()),
                &layer.param_count().to_string(),
            )
        }));

        let total = self.param_count();
        let mut out = String::new();
        out.push_str(&format!("Model: \"{}\"\n", self.name));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&summary_row("Layer (type)", "Output Shape", "Param #"));
        out.push('\n');
        out.push_str(&double_rule);
        out.push('\n');
        let spacer = format!("\n{}\n", " ".repeat(SUMMARY_WIDTH));
        out.push_str(&rows.join(spacer.as_str()));
        out.push('\n');
        out.push_str(&double_rule);
        out.push('\n');
        out.push_str(&format!("Total params: {}\n", thousands(total)));
        out.push_str(&format!("Trainable params: {}\n", thousands(total)));
        out.push_str("Non-trainable params: 0\n");
        out.push_str(&rule);
        out.push('\n');
        out
    }

    /// Saves the model with the named MessagePack recorder.
    ///
    /// `path` is given without extension; the written file is returned.
    pub fn save(&self, path: &Path) -> Result<PathBuf, ModelError> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let written = path.with_extension(
            <NamedMpkFileRecorder<FullPrecisionSettings> as FileRecorder<B>>::file_extension(),
        );
        self.clone().save_file(path.to_path_buf(), &recorder)?;
        Ok(written)
    }

    /// Loads weights saved by [`ModelGraph::save`] into a model built from `config`.
    pub fn load(
        config: &ModelGraphConfig,
        path: &Path,
        device: &B::Device,
    ) -> Result<Self, ModelError> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let model = config
            .build::<B>(device)?
            .load_file(path.to_path_buf(), &recorder, device)?;
        Ok(model)
    }
}

fn summary_row(layer: &str, shape: &str, params: &str) -> String {
    let [layer_width, shape_width, params_width] = SUMMARY_COLUMNS;
    format!(" {layer:<layer_width$}{shape:<shape_width$}{params:<params_width$}")
}

/// `266610` as `266,610`.
fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_base_model_config() {
        let config = ModelGraphConfig::base_model();
        let names: Vec<&str> = config.layer_configs.iter().map(LayerConfig::name).collect();

        assert_eq!(
            names,
            vec![
                "hiddenLayer1",
                "leaky_re_lu",
                "hiddenLayer2",
                "leaky_re_lu_1",
                "outputLayer"
            ]
        );
        assert_eq!(config.output_size(), 10);
    }

    #[test]
    fn test_base_model_build() {
        let device = <TestBackend as Backend>::Device::default();
        let model: ModelGraph<TestBackend> = ModelGraphConfig::base_model()
            .build(&device)
            .expect("Failed to build model");

        assert_eq!(model.input_shape(), [28, 28]);
        assert_eq!(model.num_layers(), 6);
        assert_eq!(model.output_size(), 10);
        assert_eq!(model.param_count(), 235_500 + 30_100 + 1_010);
    }

    #[test]
    fn test_forward_outputs_probabilities() {
        let device = <TestBackend as Backend>::Device::default();
        let model: ModelGraph<TestBackend> = ModelGraphConfig::base_model()
            .build(&device)
            .expect("Failed to build model");

        let input = Tensor::<TestBackend, 3>::ones([3, 28, 28], &device);
        let output = model.forward(input);

        assert_eq!(output.dims(), [3, 10]);
        let values: Vec<f32> = output.to_data().to_vec().unwrap();
        for row in values.chunks(10) {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_summary_lists_layers() {
        let device = <TestBackend as Backend>::Device::default();
        let model: ModelGraph<TestBackend> = ModelGraphConfig::base_model()
            .build(&device)
            .expect("Failed to build model");

        let summary = model.summary();

        assert!(summary.starts_with("Model: \"sequential\""));
        assert!(summary.contains("inputLayer (Flatten)"));
        assert!(summary.contains("(None, 784)"));
        assert!(summary.contains("hiddenLayer1 (Dense)"));
        assert!(summary.contains("235500"));
        assert!(summary.contains("leaky_re_lu_1 (LeakyReLU)"));
        assert!(summary.contains("outputLayer (Dense)"));
        assert!(summary.contains("Total params: 266,610"));
        assert!(summary.contains("Non-trainable params: 0"));
    }

    #[test]
    fn test_no_input_error() {
        let device = <TestBackend as Backend>::Device::default();
        let result: Result<ModelGraph<TestBackend>, _> = ModelGraphConfig::new("m")
            .dense("d", 4, Activation::LeakyRelu)
            .build(&device);

        assert!(matches!(result, Err(ModelError::NoInputShape)));
    }

    #[test]
    fn test_no_layers_error() {
        let device = <TestBackend as Backend>::Device::default();
        let result: Result<ModelGraph<TestBackend>, _> =
            ModelGraphConfig::new("m").flatten("in", 2, 2).build(&device);

        assert!(matches!(result, Err(ModelError::NoLayers)));
    }

    #[test]
    fn test_shape_mismatch_error() {
        let device = <TestBackend as Backend>::Device::default();
        let mut config = ModelGraphConfig::new("m")
            .flatten("in", 2, 2)
            .dense("d", 3, Activation::None);
        config.layer_configs.push(LayerConfig::Dense(DenseConfig::new("bad", 5, 1)));

        let result: Result<ModelGraph<TestBackend>, _> = config.build(&device);

        assert!(matches!(
            result,
            Err(ModelError::ShapeMismatch {
                expected: 3,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let device = <TestBackend as Backend>::Device::default();
        let config = ModelGraphConfig::new("small")
            .flatten("in", 2, 2)
            .dense("out", 3, Activation::Softmax);
        let model: ModelGraph<TestBackend> = config.build(&device).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let written = model.save(&dir.path().join("base_model")).unwrap();
        assert_eq!(written, dir.path().join("base_model.mpk"));
        assert!(written.is_file());

        let loaded = ModelGraph::<TestBackend>::load(&config, &written, &device).unwrap();
        let original = model.layers()[0].as_dense().unwrap().weights_to_vec();
        let restored = loaded.layers()[0].as_dense().unwrap().weights_to_vec();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_010), "1,010");
        assert_eq!(thousands(266_610), "266,610");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
