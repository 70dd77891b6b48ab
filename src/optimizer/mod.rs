//! # Optimizer Module
//!
//! Stochastic gradient descent for value networks.
//!
//! [`SgdTrainer`] accumulates gradients over `batch_size` calls to
//! [`SgdTrainer::accumulate`] and applies one parameter update per full batch.
//! Each update adds L2 weight decay (weights only, never biases), divides by
//! the batch size and optionally applies classical momentum:
//!
//! ```text
//! g  = (l2_decay * w + sum_of_grads) / batch_size
//! v  = momentum * v - learning_rate * g      (momentum > 0)
//! w += v                                      (or w -= learning_rate * g)
//! ```

use ndarray::{Array1, Array2};
use serde::{Serialize, Deserialize};
use crate::error::{DeepQError, Result};
use crate::layers::DenseLayer;

/// Hyperparameters for [`SgdTrainer`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerOptions {
    pub learning_rate: f32,
    pub momentum: f32,
    /// Number of `train` calls accumulated into one update
    pub batch_size: usize,
    pub l2_decay: f32,
}

impl Default for TrainerOptions {
    fn default() -> Self {
        TrainerOptions {
            learning_rate: 0.01,
            momentum: 0.0,
            batch_size: 64,
            l2_decay: 0.01,
        }
    }
}

impl TrainerOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0) || !self.learning_rate.is_finite() {
            return Err(DeepQError::invalid_parameter(
                "trainer.learning_rate",
                "must be a positive finite number",
            ));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(DeepQError::invalid_parameter("trainer.momentum", "must be in [0, 1)"));
        }
        if self.batch_size == 0 {
            return Err(DeepQError::invalid_parameter("trainer.batch_size", "must be at least 1"));
        }
        if !(self.l2_decay >= 0.0) || !self.l2_decay.is_finite() {
            return Err(DeepQError::invalid_parameter(
                "trainer.l2_decay",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

/// Mini-batch SGD with momentum and L2 decay.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SgdTrainer {
    pub options: TrainerOptions,
    /// Samples seen since construction
    k: usize,
    weight_grads: Vec<Array2<f32>>,
    bias_grads: Vec<Array1<f32>>,
    weight_velocity: Vec<Array2<f32>>,
    bias_velocity: Vec<Array1<f32>>,
}

impl SgdTrainer {
    pub fn new(options: TrainerOptions, layers: &[DenseLayer]) -> Self {
        let weight_zeros = || {
            layers
                .iter()
                .map(|layer| Array2::<f32>::zeros(layer.weights.dim()))
                .collect::<Vec<_>>()
        };
        let bias_zeros = || {
            layers
                .iter()
                .map(|layer| Array1::<f32>::zeros(layer.biases.dim()))
                .collect::<Vec<_>>()
        };

        SgdTrainer {
            options,
            k: 0,
            weight_grads: weight_zeros(),
            bias_grads: bias_zeros(),
            weight_velocity: weight_zeros(),
            bias_velocity: bias_zeros(),
        }
    }

    /// Add one sample's gradients (ordered like `layers`) and, when a batch
    /// is complete, update `layers` in place.
    ///
    /// Returns the L2 decay loss of the update, or 0.0 if no update happened.
    pub fn accumulate(
        &mut self,
        layers: &mut [DenseLayer],
        gradients: Vec<(Array2<f32>, Array1<f32>)>,
    ) -> Result<f32> {
        if gradients.len() != self.weight_grads.len() || layers.len() != self.weight_grads.len() {
            return Err(DeepQError::dimension_mismatch(
                format!("{} layers", self.weight_grads.len()),
                format!("{} gradients for {} layers", gradients.len(), layers.len()),
            ));
        }

        for (i, (wg, bg)) in gradients.into_iter().enumerate() {
            self.weight_grads[i] += &wg;
            self.bias_grads[i] += &bg;
        }

        self.k += 1;
        if self.k % self.options.batch_size != 0 {
            return Ok(0.0);
        }
        Ok(self.apply(layers))
    }

    fn apply(&mut self, layers: &mut [DenseLayer]) -> f32 {
        let TrainerOptions { learning_rate, momentum, batch_size, l2_decay } = self.options;
        let batch_size = batch_size as f32;
        let mut l2_decay_loss = 0.0;

        for (i, layer) in layers.iter_mut().enumerate() {
            l2_decay_loss += l2_decay * layer.weights.mapv(|w| w * w).sum() / 2.0;

            let weight_step = (&layer.weights * l2_decay + &self.weight_grads[i]) / batch_size;
            let bias_step = &self.bias_grads[i] / batch_size;

            if momentum > 0.0 {
                let velocity = &mut self.weight_velocity[i];
                *velocity = &*velocity * momentum - &(weight_step * learning_rate);
                layer.weights += &*velocity;

                let velocity = &mut self.bias_velocity[i];
                *velocity = &*velocity * momentum - &(bias_step * learning_rate);
                layer.biases += &*velocity;
            } else {
                layer.weights.scaled_add(-learning_rate, &weight_step);
                layer.biases.scaled_add(-learning_rate, &bias_step);
            }

            self.weight_grads[i].fill(0.0);
            self.bias_grads[i].fill(0.0);
        }

        l2_decay_loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::Activation;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_layer() -> Vec<DenseLayer> {
        let mut rng = StdRng::seed_from_u64(0);
        vec![DenseLayer::new(2, 1, Activation::Linear, &mut rng)
            .with_weights(array![[1.0], [2.0]])
            .with_biases(array![0.0])]
    }

    #[test]
    fn test_update_only_on_full_batch() {
        let mut layers = single_layer();
        let options = TrainerOptions { learning_rate: 0.1, momentum: 0.0, batch_size: 2, l2_decay: 0.0 };
        let mut trainer = SgdTrainer::new(options, &layers);

        let grads = vec![(array![[1.0], [1.0]], array![1.0])];
        let decay = trainer.accumulate(&mut layers, grads.clone()).unwrap();
        assert_eq!(decay, 0.0);
        assert_eq!(layers[0].weights, array![[1.0], [2.0]]);

        trainer.accumulate(&mut layers, grads).unwrap();
        // Two unit gradients averaged over the batch, times lr.
        assert!((layers[0].weights[[0, 0]] - 0.9).abs() < 1e-6);
        assert!((layers[0].weights[[1, 0]] - 1.9).abs() < 1e-6);
        assert!((layers[0].biases[0] + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_l2_decay_applies_to_weights_only() {
        let mut layers = single_layer();
        let options = TrainerOptions { learning_rate: 0.5, momentum: 0.0, batch_size: 1, l2_decay: 0.1 };
        let mut trainer = SgdTrainer::new(options, &layers);

        let zero = vec![(array![[0.0], [0.0]], array![0.0])];
        let decay = trainer.accumulate(&mut layers, zero).unwrap();
        assert!((decay - 0.1 * 5.0 / 2.0).abs() < 1e-6);
        assert!((layers[0].weights[[0, 0]] - 0.95).abs() < 1e-6);
        assert!((layers[0].weights[[1, 0]] - 1.9).abs() < 1e-6);
        assert_eq!(layers[0].biases[0], 0.0);
    }

    #[test]
    fn test_momentum_carries_velocity() {
        let mut layers = single_layer();
        let options = TrainerOptions { learning_rate: 1.0, momentum: 0.5, batch_size: 1, l2_decay: 0.0 };
        let mut trainer = SgdTrainer::new(options, &layers);

        let unit = vec![(array![[1.0], [0.0]], array![0.0])];
        trainer.accumulate(&mut layers, unit.clone()).unwrap();
        assert!((layers[0].weights[[0, 0]] - 0.0).abs() < 1e-6);
        trainer.accumulate(&mut layers, unit).unwrap();
        // v = 0.5 * -1 - 1 = -1.5
        assert!((layers[0].weights[[0, 0]] + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_options_validation() {
        assert!(TrainerOptions::default().validate().is_ok());
        let bad = TrainerOptions { batch_size: 0, ..TrainerOptions::default() };
        assert!(bad.validate().is_err());
        let bad = TrainerOptions { learning_rate: 0.0, ..TrainerOptions::default() };
        assert!(bad.validate().is_err());
        let bad = TrainerOptions { momentum: 1.0, ..TrainerOptions::default() };
        assert!(bad.validate().is_err());
        let bad = TrainerOptions { l2_decay: -0.1, ..TrainerOptions::default() };
        assert!(bad.validate().is_err());
    }
}
