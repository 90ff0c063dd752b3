//! Error types for feature extraction, training and classification

use thiserror::Error;

use crate::category::Category;

/// Errors that can occur while extracting features, training or classifying
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaError {
    /// The raster contains no ink pixels, so the bounding box is undefined
    #[error("glyph of {height}x{width} pixels contains no ink")]
    EmptyGlyph { height: usize, width: usize },

    /// All ink sits in a single column, so the aspect ratio is undefined
    #[error("bounding box has zero width (all ink in column {column})")]
    DegenerateBoundingBox { column: usize },

    /// Perceptron training for a class did not converge within the bound
    #[error("class {category} is not linearly separable after {iterations} corrections")]
    NonSeparable { category: Category, iterations: usize },

    /// Feature and weight vector dimensions disagree
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Raster shape and pixel data are inconsistent
    #[error("invalid raster: {0}")]
    InvalidRaster(String),

    /// A hand-built sample violates the fixed feature layout
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Sample index outside the dataset
    #[error("index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Training was asked to fit an empty dataset
    #[error("dataset is empty")]
    EmptyDataset,

    /// Training needs at least two distinct categories
    #[error("at least two categories are required, found {found}")]
    InsufficientClasses { found: usize },

    /// Trainer configuration was rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// An error tied to the position of the sample that produced it
#[derive(Debug, Clone, PartialEq, Error)]
#[error("sample {index}: {source}")]
pub struct SampleError {
    /// Index of the failing sample in the input batch
    pub index: usize,
    /// The underlying failure
    #[source]
    pub source: PlaError,
}

impl SampleError {
    pub fn new(index: usize, source: PlaError) -> Self {
        SampleError { index, source }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PlaError>;
