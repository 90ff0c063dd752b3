//! One-vs-rest perceptron training

use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::category::Category;
use crate::config::{ClassOrder, SeparatorStrategy, TrainerConfig};
use crate::dataset::GlyphDataset;
use crate::error::{PlaError, Result};
use crate::perceptron::model::{PerceptronModel, WeightVector};

/// Fits one separating hyperplane per trained category
#[derive(Debug, Clone, Default)]
pub struct PlaTrainer {
    config: TrainerConfig,
}

impl PlaTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        PlaTrainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Trains a model on `dataset`.
    ///
    /// Classes are taken in the configured order; with
    /// [`SeparatorStrategy::AllButLast`] the final class gets no separator.
    /// Any class that fails to converge fails the whole run.
    pub fn train(&self, dataset: &GlyphDataset) -> Result<PerceptronModel> {
        self.config.validate()?;
        if dataset.is_empty() {
            return Err(PlaError::EmptyDataset);
        }

        let class_order = self.class_order(dataset);
        if class_order.len() < 2 {
            return Err(PlaError::InsufficientClasses { found: class_order.len() });
        }

        let trained = match self.config.separators {
            SeparatorStrategy::AllButLast => &class_order[..class_order.len() - 1],
            SeparatorStrategy::OneVsRest => &class_order[..],
        };

        let features = dataset.feature_matrix();
        let fit = |category: &Category| {
            let labels = dataset.binary_labels(category);
            self.fit_separator(features.view(), labels.view(), category)
        };

        // Collect every outcome first so the reported failure is the earliest class
        let outcomes: Vec<Result<WeightVector>> = if self.config.parallel {
            trained.par_iter().map(fit).collect()
        } else {
            trained.iter().map(fit).collect()
        };
        let separators = outcomes.into_iter().collect::<Result<Vec<_>>>()?;

        log::info!(
            "Trained {} separators over {} samples and {} classes ({} corrections)",
            separators.len(),
            dataset.len(),
            class_order.len(),
            separators.iter().map(|s| s.corrections()).sum::<usize>()
        );

        PerceptronModel::from_parts(class_order, separators, self.config.zero_activation)
    }

    /// Runs the binary perceptron on `features` (one sample per row) against
    /// `labels` of `+1`/`-1`.
    ///
    /// Each round corrects the lowest-index misclassified sample with
    /// `W <- W + y_i * x_i`. Training stops when every sample is classified
    /// correctly, or fails once `max_iterations` corrections did not suffice.
    pub fn fit_separator(
        &self,
        features: ArrayView2<'_, f64>,
        labels: ArrayView1<'_, f64>,
        category: &Category,
    ) -> Result<WeightVector> {
        let mut weights = Array1::from_vec(self.config.initial_weights.to_vec());

        if features.ncols() != weights.len() {
            return Err(PlaError::DimensionMismatch {
                expected: weights.len(),
                actual: features.ncols(),
            });
        }
        if labels.len() != features.nrows() {
            return Err(PlaError::DimensionMismatch {
                expected: features.nrows(),
                actual: labels.len(),
            });
        }

        let zero = self.config.zero_activation;
        let mut corrections = 0;

        loop {
            let activations = features.dot(&weights);
            let mistake = activations
                .iter()
                .zip(labels.iter())
                .position(|(&activation, &label)| zero.sign(activation) != Some(label));

            let index = match mistake {
                None => break,
                Some(index) => index,
            };

            if corrections >= self.config.max_iterations {
                log::warn!(
                    "Class {} did not converge after {} corrections",
                    category,
                    corrections
                );
                return Err(PlaError::NonSeparable { category: category.clone(), iterations: corrections });
            }

            weights.scaled_add(labels[index], &features.row(index));
            corrections += 1;
        }

        log::debug!(
            "Class {} converged after {} corrections: {}",
            category,
            corrections,
            weights
        );

        Ok(WeightVector::new(category.clone(), weights, corrections))
    }

    fn class_order(&self, dataset: &GlyphDataset) -> Vec<Category> {
        let mut order = dataset.categories().to_vec();
        if self.config.class_order == ClassOrder::Lexicographic {
            order.sort();
        }
        order
    }
}
