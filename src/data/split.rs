//! Train/validation/test partitions and tensor batches.

use burn::tensor::{Int, Tensor, TensorData, backend::Backend};

use super::mnist::{HEIGHT, RawSplit, WIDTH};
use crate::errors::DataError;

/// Number of leading training examples held out for validation.
pub const VALIDATION_SIZE: usize = 5000;

const PIXEL_MAX: f32 = 255.0;

/// Rescales raw intensities into `[0, 1]`.
pub fn normalize(pixels: &[u8]) -> Vec<f32> {
    pixels.iter().map(|&p| p as f32 / PIXEL_MAX).collect()
}

/// Normalized images and their integer labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Row-major pixels in `[0, 1]`, `WIDTH * HEIGHT` values per image.
    pub images: Vec<f32>,
    pub labels: Vec<u8>,
}

impl Partition {
    pub fn from_raw(raw: &RawSplit) -> Self {
        Self {
            images: normalize(&raw.images),
            labels: raw.labels.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn image(&self, index: usize) -> &[f32] {
        let size = WIDTH * HEIGHT;
        &self.images[index * size..(index + 1) * size]
    }

    /// Gathers the examples at `indices` into a batch on `device`.
    pub fn batch<B: Backend>(&self, indices: &[usize], device: &B::Device) -> DigitBatch<B> {
        let mut pixels = Vec::with_capacity(indices.len() * WIDTH * HEIGHT);
        let mut labels = Vec::with_capacity(indices.len());

        for &index in indices {
            pixels.extend_from_slice(self.image(index));
            labels.push(self.labels[index] as i64);
        }

        let images = Tensor::<B, 3>::from_data(
            TensorData::new(pixels, [indices.len(), HEIGHT, WIDTH]).convert::<B::FloatElem>(),
            device,
        );
        let targets = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [indices.len()]).convert::<B::IntElem>(),
            device,
        );

        DigitBatch { images, targets }
    }

    /// Consecutive batches of at most `batch_size` examples, in order.
    pub fn sequential_batches<B: Backend>(
        &self,
        batch_size: usize,
        device: &B::Device,
    ) -> impl Iterator<Item = DigitBatch<B>> + '_ {
        let indices: Vec<usize> = (0..self.len()).collect();
        let device = device.clone();
        let chunks: Vec<Vec<usize>> = indices
            .chunks(batch_size.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        chunks
            .into_iter()
            .map(move |chunk| self.batch::<B>(&chunk, &device))
    }
}

/// A mini-batch: images `[batch, HEIGHT, WIDTH]` and labels `[batch]`.
#[derive(Clone, Debug)]
pub struct DigitBatch<B: Backend> {
    pub images: Tensor<B, 3>,
    pub targets: Tensor<B, 1, Int>,
}

/// The three partitions used by a run.
#[derive(Debug, Clone)]
pub struct DatasetSplits {
    pub train: Partition,
    pub valid: Partition,
    pub test: Partition,
}

impl DatasetSplits {
    /// Holds out the first `valid_size` training examples for validation and
    /// rescales every partition.
    pub fn new(train_full: RawSplit, test: RawSplit, valid_size: usize) -> Result<Self, DataError> {
        if train_full.len() < valid_size {
            return Err(DataError::PartitionTooSmall {
                available: train_full.len(),
                requested: valid_size,
            });
        }

        let (valid, train) = train_full.split_at(valid_size);

        Ok(Self {
            train: Partition::from_raw(&train),
            valid: Partition::from_raw(&valid),
            test: Partition::from_raw(&test),
        })
    }
}
