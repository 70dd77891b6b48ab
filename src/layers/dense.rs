use ndarray::{Array1, Array2, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};
use crate::activations::Activation;
use crate::error::{DeepQError, Result};

/// A fully connected (dense) layer in a value network
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DenseLayer {
    pub weights: Array2<f32>,
    pub biases: Array1<f32>,
    pub activation: Activation,
    #[serde(skip)]
    pre_activation_output: Option<Array2<f32>>,
    #[serde(skip)]
    inputs: Option<Array2<f32>>,
}

impl DenseLayer {
    /// Create a new dense layer with the given input size, output size, and activation function.
    /// Weights are drawn from `N(0, sqrt(1 / input_size))`. Biases start at 0.1 for ReLU
    /// layers and at zero otherwise.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let std = (1.0 / input_size.max(1) as f32).sqrt();
        let weights = Array2::<f32>::random_using((input_size, output_size), StandardNormal, rng) * std;
        let bias = if activation == Activation::Relu { 0.1 } else { 0.0 };
        let biases = Array1::from_elem(output_size, bias);
        DenseLayer {
            weights,
            biases,
            activation,
            pre_activation_output: None,
            inputs: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_weights(mut self, weights: Array2<f32>) -> Self {
        assert_eq!(weights.dim(), self.weights.dim());
        self.weights = weights;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_biases(mut self, biases: Array1<f32>) -> Self {
        assert_eq!(biases.dim(), self.biases.dim());
        self.biases = biases;
        self
    }

    pub fn input_size(&self) -> usize {
        self.weights.shape()[0]
    }

    pub fn output_size(&self) -> usize {
        self.weights.shape()[1]
    }

    /// Forward pass for a batch of inputs. Inputs and pre-activations are
    /// cached for the following `backward_batch` call.
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        self.inputs = Some(inputs.to_owned());
        let mut outputs = inputs.dot(&self.weights) + &self.biases.view().insert_axis(Axis(0));
        self.pre_activation_output = Some(outputs.clone());
        self.activation.apply_batch(&mut outputs);
        outputs
    }

    /// Compute the gradients for a batch of output errors.
    ///
    /// Returns `(adjusted_error, weight_gradients, bias_gradients)`, where
    /// `adjusted_error` is the error at the pre-activation output, used to
    /// propagate further back.
    pub fn backward_batch(
        &self,
        output_errors: ArrayView2<f32>,
    ) -> Result<(Array2<f32>, Array2<f32>, Array1<f32>)> {
        let pre_activation_output = self.pre_activation_output.as_ref().ok_or_else(|| {
            DeepQError::Training("forward_batch() must be called before backward_batch()".to_string())
        })?;
        let inputs = self.inputs.as_ref().ok_or_else(|| {
            DeepQError::Training("forward_batch() must be called before backward_batch()".to_string())
        })?;

        let activation_deriv = self.activation.derivative_batch(pre_activation_output.view());
        let adjusted_error = output_errors.to_owned() * &activation_deriv;
        let weight_gradients = inputs.t().dot(&adjusted_error);
        let bias_gradients = adjusted_error.sum_axis(Axis(0));

        Ok((adjusted_error, weight_gradients, bias_gradients))
    }
}
