use ndarray::{Array1, ArrayView1};
use serde::{Serialize, Deserialize};
use crate::error::{DeepQError, Result};

/// Training target for a single output dimension of a value network.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionTarget {
    /// Index of the output (action) being trained
    pub dim: usize,
    /// Value that output should move toward
    pub value: f32,
}

impl RegressionTarget {
    pub fn new(dim: usize, value: f32) -> Self {
        RegressionTarget { dim, value }
    }
}

/// Squared error on one output dimension: `0.5 * (y[dim] - value)^2`.
///
/// The gradient is zero on every other dimension, so only the selected output
/// carries a learning signal.
pub struct SingleDimSquaredLoss;

impl SingleDimSquaredLoss {
    /// Returns the loss and its gradient with respect to `prediction`.
    pub fn compute(prediction: ArrayView1<f32>, target: RegressionTarget) -> Result<(f32, Array1<f32>)> {
        if target.dim >= prediction.len() {
            return Err(DeepQError::dimension_mismatch(
                format!("target dimension < {}", prediction.len()),
                target.dim.to_string(),
            ));
        }
        let diff = prediction[target.dim] - target.value;
        let mut gradient = Array1::zeros(prediction.len());
        gradient[target.dim] = diff;
        Ok((0.5 * diff * diff, gradient))
    }
}
