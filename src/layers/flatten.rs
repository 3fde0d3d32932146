//! Input layer turning `[batch, height, width]` images into feature rows.

use burn::{
    module::Module,
    tensor::{Tensor, backend::Backend},
};

#[derive(Debug, Clone)]
pub struct FlattenConfig {
    pub name: String,
    pub height: usize,
    pub width: usize,
}

impl FlattenConfig {
    pub fn new(name: impl Into<String>, height: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            height,
            width,
        }
    }

    pub fn init(&self) -> Flatten {
        Flatten {
            name: self.name.clone(),
            height: self.height,
            width: self.width,
        }
    }
}

/// Reshapes each image into a single row of `height * width` values.
#[derive(Module, Clone, Debug)]
pub struct Flatten {
    name: String,
    height: usize,
    width: usize,
}

impl Flatten {
    pub fn forward<B: Backend>(&self, input: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch_size, _, _] = input.dims();
        input.reshape([batch_size, self.output_size()])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_shape(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    pub fn output_size(&self) -> usize {
        self.height * self.width
    }
}
