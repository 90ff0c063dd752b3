//! Glyph Perceptron Framework
//!
//! This crate turns rasterized glyph images into a small geometric feature
//! vector and fits linear separators over those vectors with the Perceptron
//! Learning Algorithm. It includes a raster abstraction, the feature
//! extractor, a labelled dataset, and a one-vs-rest trainer and classifier.

pub mod error;
pub mod raster;
pub mod features;
pub mod category;
pub mod dataset;
pub mod config;
pub mod perceptron;

pub use error::{PlaError, Result, SampleError};

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlaError, Result, SampleError};
    pub use crate::raster::Raster;
    pub use crate::features::{FeatureExtractor, GlyphFeatures, BoundingBox, FEATURE_DIM, BIAS};
    pub use crate::category::Category;
    pub use crate::dataset::{Dataset, GlyphDataset, Sample};
    pub use crate::config::{TrainerConfig, ZeroActivation, ClassOrder, SeparatorStrategy};
    pub use crate::perceptron::prelude::*;
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
