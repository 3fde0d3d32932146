//! Neural network layer implementations.
//!
//! This module contains the building blocks of the sequential digit
//! classifier: a flattening input layer, dense (fully connected) layers and
//! activation functions.

pub mod activation;
pub mod dense;
pub mod flatten;
pub mod layer;

pub use activation::Activation;
pub use dense::{Dense, DenseConfig};
pub use flatten::{Flatten, FlattenConfig};
pub use layer::{Layer, LayerConfig};
