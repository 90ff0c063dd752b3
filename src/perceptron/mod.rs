//! Perceptron Learning Algorithm
//!
//! One-vs-rest linear separators over glyph feature vectors: the trainer
//! fits a weight vector per class with mistake-driven corrections, the model
//! freezes them, and the classifier scores new samples against them.

pub mod core;
pub mod model;
pub mod trainer;
pub mod classifier;

/// Re-exports of commonly used components
pub mod prelude {
    pub use super::core::PredictiveModel;
    pub use super::model::{PerceptronModel, WeightVector};
    pub use super::trainer::PlaTrainer;
    pub use super::classifier::{Classification, PlaClassifier};
}
