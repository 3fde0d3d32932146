//! Synthetic MNIST files and configs for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use base_model::data::mnist::{HEIGHT, TEST_IMAGES, TEST_LABELS, TRAIN_IMAGES, TRAIN_LABELS, WIDTH};

fn idx_images(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x0000_0803u32.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&(HEIGHT as u32).to_be_bytes());
    bytes.extend_from_slice(&(WIDTH as u32).to_be_bytes());
    for (i, &label) in labels.iter().enumerate() {
        // a bright horizontal band whose row depends on the label
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let on = row / 3 == label as usize;
                let noise = ((i * 31 + row * 7 + col) % 17) as u8;
                bytes.push(if on { 230 + noise } else { noise });
            }
        }
    }
    bytes
}

fn idx_labels(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x0000_0801u32.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

/// Writes the four IDX files with `train` and `test` examples into `dir`.
pub fn write_mnist(dir: &Path, train: usize, test: usize) {
    fs::create_dir_all(dir).unwrap();
    let train_labels: Vec<u8> = (0..train).map(|i| (i % 10) as u8).collect();
    let test_labels: Vec<u8> = (0..test).map(|i| ((i * 3) % 10) as u8).collect();

    fs::write(dir.join(TRAIN_IMAGES), idx_images(&train_labels)).unwrap();
    fs::write(dir.join(TRAIN_LABELS), idx_labels(&train_labels)).unwrap();
    fs::write(dir.join(TEST_IMAGES), idx_images(&test_labels)).unwrap();
    fs::write(dir.join(TEST_LABELS), idx_labels(&test_labels)).unwrap();
}

/// Writes a config pointing at `artifacts_dir` and `source_dir`, returning its path.
pub fn write_config(root: &Path, artifacts_dir: &Path, source_dir: &Path) -> PathBuf {
    let path = root.join("configs").join("config.yaml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        format!(
            "artifacts:\n  artifacts_dir: {}\n  model_dir: models\n  base_model_name: base_model\ndata:\n  source_dir: {}\n",
            artifacts_dir.display(),
            source_dir.display()
        ),
    )
    .unwrap();
    path
}
