//! Reader for the MNIST IDX files.
//!
//! Files are looked up in a source directory either uncompressed
//! (`train-images-idx3-ubyte`) or gzipped (`train-images-idx3-ubyte.gz`).

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::errors::DataError;

pub const WIDTH: usize = 28;
pub const HEIGHT: usize = 28;
pub const NUM_CLASSES: usize = 10;

pub const TRAIN_IMAGES: &str = "train-images-idx3-ubyte";
pub const TRAIN_LABELS: &str = "train-labels-idx1-ubyte";
pub const TEST_IMAGES: &str = "t10k-images-idx3-ubyte";
pub const TEST_LABELS: &str = "t10k-labels-idx1-ubyte";

const IMAGES_MAGIC: u32 = 0x0000_0803;
const LABELS_MAGIC: u32 = 0x0000_0801;

/// Images and labels of one split, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSplit {
    /// Row-major pixels, `WIDTH * HEIGHT` bytes per image.
    pub images: Vec<u8>,
    pub labels: Vec<u8>,
}

impl RawSplit {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pixels of the image at `index`.
    pub fn image(&self, index: usize) -> &[u8] {
        let size = WIDTH * HEIGHT;
        &self.images[index * size..(index + 1) * size]
    }

    /// Splits off the first `at` examples, returning `(head, tail)`.
    pub fn split_at(mut self, at: usize) -> (RawSplit, RawSplit) {
        let tail_images = self.images.split_off(at * WIDTH * HEIGHT);
        let tail_labels = self.labels.split_off(at);
        (
            self,
            RawSplit {
                images: tail_images,
                labels: tail_labels,
            },
        )
    }
}

/// Loads the `(train, test)` splits from `source_dir`.
pub fn load_data(source_dir: &Path) -> Result<(RawSplit, RawSplit), DataError> {
    let train = read_split(source_dir, "train", TRAIN_IMAGES, TRAIN_LABELS)?;
    let test = read_split(source_dir, "test", TEST_IMAGES, TEST_LABELS)?;

    log::info!(
        "loaded digit dataset from {}: {} train, {} test examples",
        source_dir.display(),
        train.len(),
        test.len()
    );

    Ok((train, test))
}

fn read_split(
    source_dir: &Path,
    split: &'static str,
    images_name: &str,
    labels_name: &str,
) -> Result<RawSplit, DataError> {
    let images = read_images(&source_dir.join(images_name))?;
    let labels = read_labels(&source_dir.join(labels_name))?;

    if images.len() != labels.len() * WIDTH * HEIGHT {
        return Err(DataError::CountMismatch {
            split,
            images: images.len() / (WIDTH * HEIGHT),
            labels: labels.len(),
        });
    }

    if let Some((index, &label)) = labels
        .iter()
        .enumerate()
        .find(|(_, label)| **label as usize >= NUM_CLASSES)
    {
        return Err(DataError::LabelOutOfRange {
            index,
            label,
            num_classes: NUM_CLASSES,
        });
    }

    Ok(RawSplit { images, labels })
}

/// Reads an IDX3 image file, returning the pixel payload.
fn read_images(path: &Path) -> Result<Vec<u8>, DataError> {
    let (path, bytes) = read_idx_file(path)?;
    let magic = header_u32(&path, &bytes, 0)?;
    if magic != IMAGES_MAGIC {
        return Err(DataError::BadMagic {
            path,
            expected: IMAGES_MAGIC,
            actual: magic,
        });
    }

    let count = header_u32(&path, &bytes, 4)? as usize;
    let rows = header_u32(&path, &bytes, 8)? as usize;
    let cols = header_u32(&path, &bytes, 12)? as usize;
    if rows != HEIGHT || cols != WIDTH {
        return Err(DataError::BadImageSize {
            path,
            expected_rows: HEIGHT,
            expected_cols: WIDTH,
            rows,
            cols,
        });
    }

    payload(path, bytes, 16, count * rows * cols)
}

/// Reads an IDX1 label file, returning one byte per label.
fn read_labels(path: &Path) -> Result<Vec<u8>, DataError> {
    let (path, bytes) = read_idx_file(path)?;
    let magic = header_u32(&path, &bytes, 0)?;
    if magic != LABELS_MAGIC {
        return Err(DataError::BadMagic {
            path,
            expected: LABELS_MAGIC,
            actual: magic,
        });
    }

    let count = header_u32(&path, &bytes, 4)? as usize;
    payload(path, bytes, 8, count)
}

/// Opens `path`, falling back to `path.gz`.
fn read_idx_file(path: &Path) -> Result<(PathBuf, Vec<u8>), DataError> {
    let io_err = |path: &Path, source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    match File::open(path) {
        Ok(mut file) => {
            file.read_to_end(&mut bytes).map_err(|e| io_err(path, e))?;
            Ok((path.to_path_buf(), bytes))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let gz_path = gz_path(path);
            let file = File::open(&gz_path).map_err(|source| DataError::Unavailable {
                path: path.to_path_buf(),
                source,
            })?;
            GzDecoder::new(file)
                .read_to_end(&mut bytes)
                .map_err(|e| io_err(&gz_path, e))?;
            Ok((gz_path, bytes))
        }
        Err(err) => Err(io_err(path, err)),
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn header_u32(path: &Path, bytes: &[u8], offset: usize) -> Result<u32, DataError> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| truncated(path))
}

fn payload(path: PathBuf, mut bytes: Vec<u8>, offset: usize, len: usize) -> Result<Vec<u8>, DataError> {
    if bytes.len() < offset + len {
        return Err(truncated(&path));
    }
    bytes.truncate(offset + len);
    bytes.drain(..offset);
    Ok(bytes)
}

fn truncated(path: &Path) -> DataError {
    DataError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated IDX file"),
    }
}
