use ndarray::{Array1, ArrayView1};

use super::LossFn;
use crate::{MlErr, Result};

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }

    fn check_len(y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<()> {
        if y_pred.len() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "predictions and targets",
                got: y_pred.len(),
                expected: y.len(),
            });
        }

        Ok(())
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32> {
        Self::check_len(y_pred, y)?;

        let loss = (&y_pred - &y)
            .mapv(|x| x.powi(2))
            .mean()
            .unwrap_or_default();

        Ok(loss)
    }

    fn loss_prime(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<Array1<f32>> {
        Self::check_len(y_pred, y)?;
        Ok((&y_pred - &y) * (2.0 / y_pred.len() as f32))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_is_zero_on_exact_match() {
        let y = array![1.0, -2.0, 3.5];
        assert_eq!(Mse.loss(y.view(), y.view()).unwrap(), 0.0);
    }

    #[test]
    fn loss_is_the_mean_of_squared_errors() {
        let y_pred = array![1.0, 2.0, 3.0, 4.0];
        let y = array![0.0, 2.0, 5.0, 4.0];
        // (1 + 0 + 4 + 0) / 4
        assert_eq!(Mse.loss(y_pred.view(), y.view()).unwrap(), 1.25);
    }

    #[test]
    fn loss_is_positive_on_any_mismatch() {
        let y_pred = array![0.0, 0.0];
        let y = array![0.0, 1e-3];
        assert!(Mse.loss(y_pred.view(), y.view()).unwrap() > 0.0);
    }

    #[test]
    fn loss_prime_scales_by_two_over_batch_size() {
        let y_pred = array![3.0, 1.0];
        let y = array![1.0, 1.0];
        let d = Mse.loss_prime(y_pred.view(), y.view()).unwrap();
        assert_eq!(d, array![2.0, 0.0]);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let y_pred = array![1.0, 2.0];
        let y = array![1.0];

        let err = Mse.loss(y_pred.view(), y.view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 2,
                expected: 1,
                ..
            }
        ));
        assert!(Mse.loss_prime(y_pred.view(), y.view()).is_err());
    }
}
