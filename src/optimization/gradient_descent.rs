use ndarray::{ArrayView1, ArrayViewMut1};

use super::Optimizer;

/// Plain gradient descent: `θ ← θ − lr · ∇θ`, with no state besides the learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        // Extra entries on either side are left untouched.
        let n = params.len().min(grad.len());

        let mut params = ArrayViewMut1::from(&mut params[..n]);
        params.scaled_add(-self.learning_rate, &ArrayView1::from(&grad[..n]));
    }
}
