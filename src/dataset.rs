//! Labelled collections of glyph feature vectors

use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::category::Category;
use crate::error::{PlaError, Result, SampleError};
use crate::features::{FeatureExtractor, GlyphFeatures, BIAS, FEATURE_DIM};
use crate::raster::Raster;

/// Trait representing a dataset
pub trait Dataset {
    type Input;
    type Target;
    type Error: std::error::Error;

    /// Get the number of samples in the dataset
    fn len(&self) -> usize;

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a batch of samples
    fn get_batch(&self, indices: &[usize]) -> std::result::Result<(Vec<Self::Input>, Vec<Self::Target>), Self::Error>;

    /// Get a single sample
    fn get_sample(&self, index: usize) -> std::result::Result<(Self::Input, Self::Target), Self::Error>;
}

/// A feature vector and the category it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    features: Array1<f64>,
    label: Category,
}

impl Sample {
    /// Creates a sample, checking the `[.., .., .., 1.0]` layout
    pub fn new(features: Array1<f64>, label: Category) -> Result<Self> {
        if features.len() != FEATURE_DIM {
            return Err(PlaError::InvalidSample(format!(
                "expected {} features, got {}",
                FEATURE_DIM,
                features.len()
            )));
        }
        if features[FEATURE_DIM - 1] != BIAS {
            return Err(PlaError::InvalidSample(format!(
                "bias term must be {}, got {}",
                BIAS,
                features[FEATURE_DIM - 1]
            )));
        }
        if let Some(bad) = features.iter().find(|x| !x.is_finite()) {
            return Err(PlaError::InvalidSample(format!("features must be finite, got {}", bad)));
        }

        Ok(Sample { features, label })
    }

    pub fn from_glyph(features: GlyphFeatures, label: Category) -> Self {
        Sample { features: features.to_vector(), label }
    }

    pub fn features(&self) -> &Array1<f64> {
        &self.features
    }

    pub fn label(&self) -> &Category {
        &self.label
    }
}

/// Ordered samples plus the categories they use, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphDataset {
    samples: Vec<Sample>,
    categories: Vec<Category>,
}

impl GlyphDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut dataset = Self::new();
        for sample in samples {
            dataset.push(sample);
        }
        dataset
    }

    /// Extracts every raster and aborts on the first (lowest index) failure
    pub fn from_rasters(pairs: Vec<(Raster, Category)>) -> std::result::Result<Self, SampleError> {
        let mut dataset = Self::new();
        for (index, (features, label)) in extract_pairs(pairs).into_iter().enumerate() {
            let features = features.map_err(|source| SampleError::new(index, source))?;
            dataset.push(Sample { features, label });
        }

        log::debug!("Assembled dataset of {} samples", dataset.len());
        Ok(dataset)
    }

    /// Extracts every raster, keeping the good ones and reporting the rest
    pub fn from_rasters_skipping(pairs: Vec<(Raster, Category)>) -> (Self, Vec<SampleError>) {
        let mut dataset = Self::new();
        let mut skipped = Vec::new();

        for (index, (features, label)) in extract_pairs(pairs).into_iter().enumerate() {
            match features {
                Ok(features) => dataset.push(Sample { features, label }),
                Err(source) => {
                    log::warn!("Skipping sample {} ({}): {}", index, label, source);
                    skipped.push(SampleError::new(index, source));
                }
            }
        }

        (dataset, skipped)
    }

    pub fn push(&mut self, sample: Sample) {
        if !self.categories.contains(&sample.label) {
            self.categories.push(sample.label.clone());
        }
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn labels(&self) -> Vec<&Category> {
        self.samples.iter().map(|s| &s.label).collect()
    }

    /// All feature vectors stacked as rows, shape `(len, FEATURE_DIM)`
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.len(), FEATURE_DIM));
        for (mut row, sample) in matrix.rows_mut().into_iter().zip(&self.samples) {
            row.assign(&sample.features);
        }
        matrix
    }

    /// `+1` for samples of `category`, `-1` for every other sample
    pub fn binary_labels(&self, category: &Category) -> Array1<f64> {
        self.samples
            .iter()
            .map(|s| if &s.label == category { 1.0 } else { -1.0 })
            .collect()
    }

    /// Shuffles the samples with a caller-supplied generator.
    /// Category order is recomputed from the new sample order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut samples = std::mem::take(&mut self.samples);
        samples.shuffle(rng);
        *self = Self::from_samples(samples);
    }

    /// Splits into `(train, test)` with `test_ratio` of the samples in `test`
    pub fn split<R: Rng + ?Sized>(&self, test_ratio: f64, rng: &mut R) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&test_ratio) {
            return Err(PlaError::InvalidConfig(format!(
                "test ratio must be in [0, 1], got {}",
                test_ratio
            )));
        }

        let n_test = (self.len() as f64 * test_ratio).round() as usize;
        let n_train = self.len() - n_test;

        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);

        let pick = |idx: &[usize]| Self::from_samples(idx.iter().map(|&i| self.samples[i].clone()));
        Ok((pick(&indices[..n_train]), pick(&indices[n_train..])))
    }
}

impl Dataset for GlyphDataset {
    type Input = Array1<f64>;
    type Target = Category;
    type Error = PlaError;

    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get_batch(&self, indices: &[usize]) -> Result<(Vec<Self::Input>, Vec<Self::Target>)> {
        let mut batch_features = Vec::with_capacity(indices.len());
        let mut batch_targets = Vec::with_capacity(indices.len());

        for &idx in indices {
            let (features, label) = self.get_sample(idx)?;
            batch_features.push(features);
            batch_targets.push(label);
        }

        Ok((batch_features, batch_targets))
    }

    fn get_sample(&self, index: usize) -> Result<(Self::Input, Self::Target)> {
        let sample = self.samples.get(index).ok_or(PlaError::IndexOutOfBounds {
            index,
            len: self.samples.len(),
        })?;

        Ok((sample.features.clone(), sample.label.clone()))
    }
}

fn extract_pairs(pairs: Vec<(Raster, Category)>) -> Vec<(Result<Array1<f64>>, Category)> {
    let extractor = FeatureExtractor::new();
    pairs
        .into_par_iter()
        .map(|(raster, label)| (extractor.extract(&raster), label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ink: f64, label: &str) -> Sample {
        Sample::from_glyph(GlyphFeatures::new(ink, 1.0, 0.5), Category::new(label))
    }

    #[test]
    fn test_categories_first_seen() {
        let dataset = GlyphDataset::from_samples(vec![
            sample(0.1, "b"),
            sample(0.2, "a"),
            sample(0.3, "b"),
            sample(0.4, "c"),
        ]);

        let names: Vec<&str> = dataset.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(dataset.binary_labels(&Category::new("b")).to_vec(), vec![1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_sample_layout_checked() {
        let label = Category::new("a");
        assert!(Sample::new(Array1::from_vec(vec![0.1, 0.2, 1.0]), label.clone()).is_err());
        assert!(Sample::new(Array1::from_vec(vec![0.1, 0.2, 0.3, 0.0]), label.clone()).is_err());
        assert!(Sample::new(Array1::from_vec(vec![0.1, 0.2, 0.3, 1.0]), label).is_ok());
    }
}
