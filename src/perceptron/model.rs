//! Trained perceptron models

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::config::ZeroActivation;
use crate::error::{PlaError, Result};
use crate::features::FEATURE_DIM;

/// A hyperplane `w·x = 0` separating one category from all others
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    category: Category,
    weights: Array1<f64>,
    /// Number of perceptron corrections that produced these weights
    corrections: usize,
}

impl WeightVector {
    pub fn new(category: Category, weights: Array1<f64>, corrections: usize) -> Self {
        WeightVector { category, weights, corrections }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn corrections(&self) -> usize {
        self.corrections
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Signed distance-like score `w·x`
    pub fn activation(&self, features: &Array1<f64>) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(PlaError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        Ok(self.weights.dot(features))
    }
}

/// The frozen result of a training run.
///
/// `class_order` lists every category seen in training; `separators` holds
/// one weight vector per trained category, in the same order. When the last
/// category has no separator it is the implicit class, predicted whenever no
/// separator claims a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelParts", into = "ModelParts")]
pub struct PerceptronModel {
    class_order: Vec<Category>,
    separators: Vec<WeightVector>,
    zero_activation: ZeroActivation,
}

#[derive(Serialize, Deserialize)]
struct ModelParts {
    class_order: Vec<Category>,
    separators: Vec<WeightVector>,
    zero_activation: ZeroActivation,
}

impl TryFrom<ModelParts> for PerceptronModel {
    type Error = PlaError;

    fn try_from(parts: ModelParts) -> Result<Self> {
        PerceptronModel::from_parts(parts.class_order, parts.separators, parts.zero_activation)
    }
}

impl From<PerceptronModel> for ModelParts {
    fn from(model: PerceptronModel) -> Self {
        ModelParts {
            class_order: model.class_order,
            separators: model.separators,
            zero_activation: model.zero_activation,
        }
    }
}

impl PerceptronModel {
    /// Assembles a model, checking that separators follow `class_order`,
    /// cover every class or all but the last, and share the feature dimension
    pub fn from_parts(
        class_order: Vec<Category>,
        separators: Vec<WeightVector>,
        zero_activation: ZeroActivation,
    ) -> Result<Self> {
        if class_order.len() < 2 {
            return Err(PlaError::InsufficientClasses { found: class_order.len() });
        }

        for (i, category) in class_order.iter().enumerate() {
            if class_order[..i].contains(category) {
                return Err(PlaError::InvalidConfig(format!(
                    "category {} appears more than once in class order",
                    category
                )));
            }
        }

        let n = class_order.len();
        if separators.len() != n && separators.len() != n - 1 {
            return Err(PlaError::InvalidConfig(format!(
                "{} classes need {} or {} separators, got {}",
                n, n - 1, n, separators.len()
            )));
        }

        for (separator, category) in separators.iter().zip(&class_order) {
            if separator.category() != category {
                return Err(PlaError::InvalidConfig(format!(
                    "separator for {} found where {} was expected",
                    separator.category(), category
                )));
            }
            if separator.len() != FEATURE_DIM {
                return Err(PlaError::DimensionMismatch {
                    expected: FEATURE_DIM,
                    actual: separator.len(),
                });
            }
        }

        Ok(PerceptronModel { class_order, separators, zero_activation })
    }

    /// Every category seen in training, in training order
    pub fn class_order(&self) -> &[Category] {
        &self.class_order
    }

    pub fn separators(&self) -> &[WeightVector] {
        &self.separators
    }

    pub fn zero_activation(&self) -> ZeroActivation {
        self.zero_activation
    }

    /// Weight vector trained for `category`, if it has one
    pub fn weights_for(&self, category: &Category) -> Option<&WeightVector> {
        self.separators.iter().find(|s| s.category() == category)
    }

    /// The category without a separator, if any
    pub fn implicit_class(&self) -> Option<&Category> {
        if self.separators.len() < self.class_order.len() {
            self.class_order.last()
        } else {
            None
        }
    }

    /// Feature dimension every input must have
    pub fn dimension(&self) -> usize {
        self.separators.first().map_or(FEATURE_DIM, WeightVector::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separator(name: &str) -> WeightVector {
        WeightVector::new(Category::new(name), Array1::from_elem(FEATURE_DIM, 1.0), 0)
    }

    #[test]
    fn test_from_parts_checks_order_and_count() {
        let classes = vec![Category::new("a"), Category::new("b"), Category::new("c")];

        let model = PerceptronModel::from_parts(
            classes.clone(),
            vec![separator("a"), separator("b")],
            ZeroActivation::Misclassified,
        )
        .unwrap();
        assert_eq!(model.implicit_class(), Some(&Category::new("c")));
        assert!(model.weights_for(&Category::new("c")).is_none());

        assert!(PerceptronModel::from_parts(
            classes.clone(),
            vec![separator("b"), separator("a")],
            ZeroActivation::Misclassified,
        )
        .is_err());
        assert!(PerceptronModel::from_parts(
            vec![Category::new("a"), Category::new("a")],
            vec![separator("a")],
            ZeroActivation::Misclassified,
        )
        .is_err());
        assert!(PerceptronModel::from_parts(
            classes,
            vec![separator("a")],
            ZeroActivation::Misclassified,
        )
        .is_err());
    }

    #[test]
    fn test_activation_dimension() {
        let w = separator("a");
        let x = Array1::from_vec(vec![0.5, 0.5, 0.5]);
        assert_eq!(
            w.activation(&x),
            Err(PlaError::DimensionMismatch { expected: 4, actual: 3 })
        );
    }
}
