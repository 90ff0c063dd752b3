//! Multiclass decisions from trained separators

use ndarray::Array1;

use crate::category::Category;
use crate::dataset::GlyphDataset;
use crate::error::{PlaError, Result};
use crate::features::FeatureExtractor;
use crate::perceptron::core::PredictiveModel;
use crate::perceptron::model::PerceptronModel;
use crate::raster::Raster;

/// Per-class scores and the predicted category for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    scores: Vec<(Category, f64)>,
    predicted: Category,
    implicit: bool,
}

impl Classification {
    /// `w_c·x` for every category that has a separator, in class order
    pub fn scores(&self) -> &[(Category, f64)] {
        &self.scores
    }

    pub fn score(&self, category: &Category) -> Option<f64> {
        self.scores.iter().find(|(c, _)| c == category).map(|&(_, s)| s)
    }

    pub fn predicted(&self) -> &Category {
        &self.predicted
    }

    /// True when no separator claimed the sample and the implicit class won
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }
}

/// Applies a trained [`PerceptronModel`] to feature vectors or rasters.
///
/// With one separator per class the prediction is the highest score. When the
/// last class has no separator, the highest score among separators with a
/// positive activation wins, and the implicit class is predicted when none
/// is positive. Ties go to the class that comes first in training order.
#[derive(Debug, Clone, Copy)]
pub struct PlaClassifier<'a> {
    model: &'a PerceptronModel,
    extractor: FeatureExtractor,
}

impl<'a> PlaClassifier<'a> {
    pub fn new(model: &'a PerceptronModel) -> Self {
        PlaClassifier { model, extractor: FeatureExtractor::new() }
    }

    pub fn model(&self) -> &PerceptronModel {
        self.model
    }

    pub fn classify(&self, features: &Array1<f64>) -> Result<Classification> {
        if features.len() != self.model.dimension() {
            return Err(PlaError::DimensionMismatch {
                expected: self.model.dimension(),
                actual: features.len(),
            });
        }
        if let Some(bad) = features.iter().find(|x| !x.is_finite()) {
            return Err(PlaError::InvalidSample(format!("features must be finite, got {}", bad)));
        }

        let scores = self
            .model
            .separators()
            .iter()
            .map(|separator| -> Result<(Category, f64)> {
                Ok((separator.category().clone(), separator.activation(features)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let zero = self.model.zero_activation();
        let implicit_class = self.model.implicit_class();

        let mut best: Option<&(Category, f64)> = None;
        for entry in &scores {
            if implicit_class.is_some() && !zero.is_positive(entry.1) {
                continue;
            }
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }

        let (predicted, implicit) = match (best, implicit_class) {
            (Some((category, _)), _) => (category.clone(), false),
            (None, Some(category)) => {
                log::debug!("No separator claimed the sample, predicting {}", category);
                (category.clone(), true)
            }
            (None, None) => {
                return Err(PlaError::InsufficientClasses { found: self.model.class_order().len() })
            }
        };

        Ok(Classification { scores, predicted, implicit })
    }

    /// Extracts features with the same extractor used for training and classifies them
    pub fn classify_raster(&self, raster: &Raster) -> Result<Classification> {
        let features = self.extractor.extract(raster)?;
        self.classify(&features)
    }

    /// Fraction of `dataset` samples whose predicted category matches the label
    pub fn accuracy(&self, dataset: &GlyphDataset) -> Result<f64> {
        if dataset.is_empty() {
            return Err(PlaError::EmptyDataset);
        }

        let mut correct = 0;
        for sample in dataset.samples() {
            if self.classify(sample.features())?.predicted() == sample.label() {
                correct += 1;
            }
        }

        Ok(correct as f64 / dataset.len() as f64)
    }
}

impl PredictiveModel for PlaClassifier<'_> {
    type Input = Array1<f64>;
    type Output = Classification;
    type Error = PlaError;

    fn predict(&self, input: &Self::Input) -> Result<Self::Output> {
        self.classify(input)
    }
}
