use ndarray::{Array1, ArrayView1};

use crate::Result;

pub trait LossFn {
    /// Computes the loss between the predictions and the expected values.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `y_pred` and `y` have different lengths.
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32>;

    /// Computes the derivative of the loss with respect to each prediction.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `y_pred` and `y` have different lengths.
    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<Array1<f32>>;
}
