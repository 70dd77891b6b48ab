use ndarray::{Array1, ArrayView1};
use crate::error::Result;
use crate::loss::RegressionTarget;

/// Function approximator consumed by [`Brain`](crate::agent::Brain).
///
/// Maps an encoded input of length `input_width()` to one value per action
/// (`output_width()` values).
pub trait Approximator {
    /// Declared input width
    fn input_width(&self) -> usize;

    /// Declared output width, one per discrete action
    fn output_width(&self) -> usize;

    /// Compute the value of every action for `input`. Must not change the
    /// function the approximator represents.
    fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32>;

    /// Take one optimization step moving output `target.dim` toward
    /// `target.value`, returning the loss. Other outputs must not receive an
    /// explicit learning signal.
    fn train(&mut self, input: ArrayView1<f32>, target: RegressionTarget) -> Result<f32>;
}

impl<A: Approximator + ?Sized> Approximator for Box<A> {
    fn input_width(&self) -> usize {
        (**self).input_width()
    }

    fn output_width(&self) -> usize {
        (**self).output_width()
    }

    fn forward(&mut self, input: ArrayView1<f32>) -> Array1<f32> {
        (**self).forward(input)
    }

    fn train(&mut self, input: ArrayView1<f32>, target: RegressionTarget) -> Result<f32> {
        (**self).train(input, target)
    }
}
