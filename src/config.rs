//! Configuration parameters for perceptron training

use serde::{Deserialize, Serialize};

use crate::error::{PlaError, Result};
use crate::features::FEATURE_DIM;

/// How a zero activation `w·x = 0` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroActivation {
    /// A zero activation matches neither label and always counts as a mistake
    Misclassified,
    /// A zero activation is read as `+1`
    Positive,
    /// A zero activation is read as `-1`
    Negative,
}

impl ZeroActivation {
    /// Sign of an activation under this convention, `None` for an unsigned zero
    pub fn sign(self, activation: f64) -> Option<f64> {
        if activation > 0.0 {
            Some(1.0)
        } else if activation < 0.0 {
            Some(-1.0)
        } else {
            match self {
                ZeroActivation::Misclassified => None,
                ZeroActivation::Positive => Some(1.0),
                ZeroActivation::Negative => Some(-1.0),
            }
        }
    }

    /// Whether an activation claims membership of the positive class
    pub fn is_positive(self, activation: f64) -> bool {
        self.sign(activation) == Some(1.0)
    }
}

/// Order in which the distinct categories of a dataset are trained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassOrder {
    /// Order of first appearance in the dataset
    FirstSeen,
    /// Sorted by category name
    Lexicographic,
}

/// Which categories receive a separating hyperplane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparatorStrategy {
    /// Every category except the last in class order; the last one is implied
    /// when no separator claims a sample
    AllButLast,
    /// One separator per category
    OneVsRest,
}

/// Perceptron training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Starting weight vector for every class (default: `[1, 1, 1, 1]`)
    pub initial_weights: [f64; FEATURE_DIM],

    /// Maximum number of corrections per class before giving up (default: 10000)
    pub max_iterations: usize,

    /// Interpretation of `sign(0)` (default: Misclassified)
    pub zero_activation: ZeroActivation,

    /// Class ordering used for training and tie-breaking (default: FirstSeen)
    pub class_order: ClassOrder,

    /// Which classes get a separator (default: AllButLast)
    pub separators: SeparatorStrategy,

    /// Train the per-class loops concurrently (default: false)
    /// Results are identical to sequential training
    pub parallel: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            initial_weights: [1.0; FEATURE_DIM],
            max_iterations: 10_000,
            zero_activation: ZeroActivation::Misclassified,
            class_order: ClassOrder::FirstSeen,
            separators: SeparatorStrategy::AllButLast,
            parallel: false,
        }
    }
}

impl TrainerConfig {
    pub fn with_initial_weights(mut self, weights: [f64; FEATURE_DIM]) -> Self {
        self.initial_weights = weights;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_zero_activation(mut self, zero_activation: ZeroActivation) -> Self {
        self.zero_activation = zero_activation;
        self
    }

    pub fn with_class_order(mut self, class_order: ClassOrder) -> Self {
        self.class_order = class_order;
        self
    }

    pub fn with_separators(mut self, separators: SeparatorStrategy) -> Self {
        self.separators = separators;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rejects configurations that cannot train anything
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(PlaError::InvalidConfig("max_iterations must be positive".to_string()));
        }
        if self.initial_weights.iter().any(|w| !w.is_finite()) {
            return Err(PlaError::InvalidConfig(format!(
                "initial weights must be finite, got {:?}",
                self.initial_weights
            )));
        }

        Ok(())
    }
}
