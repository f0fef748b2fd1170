use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{MlErr, Result, optimization::Optimizer};

/// A model whose parameters live in a single flat buffer.
pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Returns the model's flat parameter buffer.
    fn params(&self) -> &[f32];

    /// Returns the model's flat parameter buffer, mutably.
    fn params_mut(&mut self) -> &mut [f32];

    /// Makes a forward pass over a batch of inputs, one row per example.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if the amount of columns in `x` is not the model's input size.
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array1<f32>>;

    /// Writes the gradient of the loss with respect to the parameters into `grad`.
    ///
    /// # Arguments
    /// * `x` - The batch the last prediction was made on.
    /// * `d` - The derivative of the loss with respect to each prediction.
    /// * `grad` - A buffer of `size()` elements, overwritten with the gradient.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if the shapes of `x`, `d` and `grad` don't agree with the model.
    fn backward(&self, x: ArrayView2<f32>, d: ArrayView1<f32>, grad: &mut [f32]) -> Result<()>;

    /// Applies one optimizer step to the parameters of this model.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `grad` is not `size()` long.
    fn step<O: Optimizer>(&mut self, optimizer: &mut O, grad: &[f32]) -> Result<()> {
        let size = self.size();
        if grad.len() != size {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: size,
            });
        }

        optimizer.update_params(self.params_mut(), grad);
        Ok(())
    }
}
