//! Core traits for trained models

use std::error::Error;

/// Trait for models that can make predictions
pub trait PredictiveModel {
    /// Type of input data
    type Input;

    /// Type of output predictions
    type Output;

    /// Type of errors this model can produce
    type Error: Error;

    /// Make a prediction for a single input
    fn predict(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;

    /// Make predictions for a batch of inputs
    fn predict_batch(&self, inputs: &[Self::Input]) -> Result<Vec<Self::Output>, Self::Error> {
        inputs.iter().map(|input| self.predict(input)).collect()
    }
}
