use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;

use crate::agent::traits::Approximator;
use crate::error::{DeepQError, Result};
use crate::layers::{DenseLayer, LayerDef};
use crate::loss::{RegressionTarget, SingleDimSquaredLoss};
use crate::optimizer::{SgdTrainer, TrainerOptions};
use crate::activations::Activation;

/// A feed-forward value network: a stack of dense layers ending in a linear
/// regression layer, trained one output dimension at a time by an
/// [`SgdTrainer`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ValueNetwork {
    pub layers: Vec<DenseLayer>,
    pub trainer: SgdTrainer,
}

impl ValueNetwork {
    /// Build a network from layer definitions.
    ///
    /// Each `Fc` definition becomes a dense layer with its activation; the
    /// closing `Regression` definition becomes a linear dense layer.
    pub fn from_layer_defs<R: Rng + ?Sized>(
        defs: &[LayerDef],
        options: TrainerOptions,
        rng: &mut R,
    ) -> Result<Self> {
        LayerDef::validate_stack(defs)?;
        options.validate()?;

        let mut layers = Vec::with_capacity(defs.len() - 1);
        let mut input_size = defs[0].width();
        for def in &defs[1..] {
            let activation = match def {
                LayerDef::Fc { activation, .. } => *activation,
                _ => Activation::Linear,
            };
            layers.push(DenseLayer::new(input_size, def.width(), activation, rng));
            input_size = def.width();
        }

        let trainer = SgdTrainer::new(options, &layers);
        Ok(ValueNetwork { layers, trainer })
    }

    /// Perform a forward pass for a batch of input vectors.
    fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current_output = inputs.to_owned();
        for layer in &mut self.layers {
            current_output = layer.forward_batch(current_output.view());
        }
        current_output
    }

    /// Backpropagate output errors, returning per-layer gradients ordered
    /// from the first layer to the last.
    fn backward_batch(&self, output_errors: ArrayView2<f32>) -> Result<Vec<(Array2<f32>, Array1<f32>)>> {
        let mut gradients = Vec::with_capacity(self.layers.len());
        let mut current_error = output_errors.to_owned();

        for (i, layer) in self.layers.iter().enumerate().rev() {
            let (adjusted_error, weight_gradients, bias_gradients) =
                layer.backward_batch(current_error.view())?;
            gradients.push((weight_gradients, bias_gradients));
            if i != 0 {
                current_error = adjusted_error.dot(&layer.weights.t());
            }
        }

        gradients.reverse();
        Ok(gradients)
    }

    /// Save the network, including trainer state, to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = bincode::serialize(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a network previously written by [`ValueNetwork::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        let network: Self = bincode::deserialize(&data)?;
        Ok(network)
    }
}

impl Approximator for ValueNetwork {
    fn input_width(&self) -> usize {
        self.layers.first().map_or(0, |layer| layer.input_size())
    }

    fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.output_size())
    }

    fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32> {
        let input = input.insert_axis(Axis(0));
        let output = self.forward_batch(input);
        output.index_axis_move(Axis(0), 0)
    }

    fn train(&mut self, input: ArrayView1<f32>, target: RegressionTarget) -> Result<f32> {
        if input.len() != self.input_width() {
            return Err(DeepQError::dimension_mismatch(
                self.input_width().to_string(),
                input.len().to_string(),
            ));
        }

        let prediction = self.forward(input);
        let (cost_loss, gradient) = SingleDimSquaredLoss::compute(prediction.view(), target)?;
        if !cost_loss.is_finite() {
            return Err(DeepQError::Training(format!(
                "non-finite loss {} for output {}",
                cost_loss, target.dim
            )));
        }

        let gradients = self.backward_batch(gradient.view().insert_axis(Axis(0)))?;
        let decay_loss = self.trainer.accumulate(&mut self.layers, gradients)?;
        Ok(cost_loss + decay_loss)
    }
}
