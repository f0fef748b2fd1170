use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut1};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::{
    Model,
    loss::{LossFn, Mse},
};
use crate::{MlErr, Result, optimization::GradientDescent};

/// Standard deviation of the normal distribution the weights are drawn from.
pub const INIT_STD_DEV: f32 = 0.01;

/// A single affine layer mapping `num_inputs` features to one scalar output.
///
/// The parameters are stored as `[w_0, ..., w_{n-1}, b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    num_inputs: usize,
    params: Vec<f32>,
}

impl Linear {
    /// Creates a new `Linear` with small random weights and a zero bias.
    ///
    /// # Arguments
    /// * `num_inputs` - The amount of features of each input row.
    /// * `rng` - The random number generator used for the weights.
    pub fn new<R: Rng + ?Sized>(num_inputs: usize, rng: &mut R) -> Result<Self> {
        let normal = Normal::new(0.0, INIT_STD_DEV)?;

        let mut params: Vec<f32> = normal.sample_iter(rng).take(num_inputs).collect();
        params.push(0.0);

        Ok(Self { num_inputs, params })
    }

    /// Creates a new `Linear` with the given weights and bias.
    pub fn from_params(weights: &[f32], bias: f32) -> Self {
        let mut params = weights.to_vec();
        params.push(bias);

        Self {
            num_inputs: weights.len(),
            params,
        }
    }

    /// Returns the amount of features this model expects on each input row.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.view_params().0
    }

    pub fn bias(&self) -> f32 {
        self.view_params().1
    }

    /// Computes `x · w + b` for every row of `x`.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        self.forward(x)
    }

    /// Mean squared error between `y_pred` and `y`.
    pub fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32> {
        Mse.loss(y_pred, y)
    }

    /// Returns the gradient descent rule used to train this model.
    pub fn configure_optimizer(&self, learning_rate: f32) -> GradientDescent {
        GradientDescent::new(learning_rate)
    }

    fn view_params(&self) -> (ArrayView1<'_, f32>, f32) {
        let (w, b) = self.params.split_at(self.num_inputs);
        (ArrayView1::from(w), b[0])
    }

    fn check_inputs(&self, x: &ArrayView2<f32>) -> Result<()> {
        if x.ncols() != self.num_inputs {
            return Err(MlErr::SizeMismatch {
                what: "input features",
                got: x.ncols(),
                expected: self.num_inputs,
            });
        }

        Ok(())
    }
}

impl Model for Linear {
    fn size(&self) -> usize {
        self.params.len()
    }

    fn params(&self) -> &[f32] {
        &self.params
    }

    fn params_mut(&mut self) -> &mut [f32] {
        &mut self.params
    }

    fn forward(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        self.check_inputs(&x)?;

        let (w, b) = self.view_params();
        Ok(x.dot(&w) + b)
    }

    fn backward(&self, x: ArrayView2<f32>, d: ArrayView1<f32>, grad: &mut [f32]) -> Result<()> {
        self.check_inputs(&x)?;

        if d.len() != x.nrows() {
            return Err(MlErr::SizeMismatch {
                what: "loss derivative",
                got: d.len(),
                expected: x.nrows(),
            });
        }

        if grad.len() != self.size() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: self.size(),
            });
        }

        let (dw_raw, db_raw) = grad.split_at_mut(self.num_inputs);
        ArrayViewMut1::from(dw_raw).assign(&x.t().dot(&d));
        db_raw[0] = d.sum();

        Ok(())
    }
}
