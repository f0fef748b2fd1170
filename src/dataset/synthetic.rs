use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand::{Rng, seq::SliceRandom};
use rand_distr::{Normal, StandardNormal};

use super::Batches;
use crate::{MlErr, Result};

/// Standard deviation of the noise added to the targets when none is given.
pub const DEFAULT_NOISE_STD: f32 = 0.01;

/// Generates datasets following `y = X · w + b + ε`, with `ε ~ N(0, noise_std)`.
#[derive(Debug, Clone)]
pub struct SyntheticRegression {
    true_weights: Vec<f32>,
    true_bias: f32,
    noise_std: f32,
    num_train: NonZeroUsize,
    num_val: usize,
    batch_size: NonZeroUsize,
}

impl SyntheticRegression {
    /// Creates a new `SyntheticRegression` generator with the default noise.
    ///
    /// # Arguments
    /// * `true_weights` - The weights of the underlying linear function, one per feature.
    /// * `true_bias` - The bias of the underlying linear function.
    /// * `num_train` - The amount of training examples.
    /// * `num_val` - The amount of validation examples.
    /// * `batch_size` - The size of the batches the data will be served in.
    pub fn new(
        true_weights: Vec<f32>,
        true_bias: f32,
        num_train: NonZeroUsize,
        num_val: usize,
        batch_size: NonZeroUsize,
    ) -> Self {
        Self {
            true_weights,
            true_bias,
            noise_std: DEFAULT_NOISE_STD,
            num_train,
            num_val,
            batch_size,
        }
    }

    /// Sets the standard deviation of the noise added to the targets.
    pub fn with_noise_std(mut self, noise_std: f32) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Samples a new dataset.
    ///
    /// # Errors
    /// `MlErr::InvalidSpec` if `noise_std` is negative or not finite.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SyntheticData> {
        // `Normal` accepts a negative std and samples its mirror image.
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(MlErr::InvalidSpec(
                "noise_std must be a non-negative finite number",
            ));
        }
        let noise = Normal::new(0.0, self.noise_std)?;

        let n = self.num_train.get() + self.num_val;
        let w = ArrayView1::from(&self.true_weights[..]);

        let x = Array2::<f32>::random_using((n, w.len()), StandardNormal, rng);
        let eps = Array1::<f32>::random_using(n, noise, rng);
        let y = x.dot(&w) + self.true_bias + eps;

        Ok(SyntheticData {
            x,
            y,
            num_train: self.num_train.get(),
            batch_size: self.batch_size,
        })
    }
}

/// A generated dataset. The first `num_train` rows form the training split and
/// the rest the validation split.
#[derive(Debug, Clone)]
pub struct SyntheticData {
    x: Array2<f32>,
    y: Array1<f32>,
    num_train: usize,
    batch_size: NonZeroUsize,
}

impl SyntheticData {
    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    #[inline]
    pub fn targets(&self) -> ArrayView1<'_, f32> {
        self.y.view()
    }

    /// Total amount of examples, training and validation.
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Amount of features per example.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn num_train(&self) -> usize {
        self.num_train
    }

    #[inline]
    pub fn num_val(&self) -> usize {
        self.len() - self.num_train
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Amount of batches in a pass over the training split.
    pub fn num_train_batches(&self) -> usize {
        self.num_train.div_ceil(self.batch_size())
    }

    pub fn train_split(&self) -> (ArrayView2<'_, f32>, ArrayView1<'_, f32>) {
        let (x, _) = self.x.view().split_at(Axis(0), self.num_train);
        let (y, _) = self.y.view().split_at(Axis(0), self.num_train);
        (x, y)
    }

    pub fn val_split(&self) -> (ArrayView2<'_, f32>, ArrayView1<'_, f32>) {
        let (_, x) = self.x.view().split_at(Axis(0), self.num_train);
        let (_, y) = self.y.view().split_at(Axis(0), self.num_train);
        (x, y)
    }

    /// Returns the training split in batches, visiting its rows in a fresh random order.
    pub fn train_batches<R: Rng + ?Sized>(&self, rng: &mut R) -> Batches<'_> {
        let (x, y) = self.train_split();

        let mut order: Vec<usize> = (0..self.num_train).collect();
        order.shuffle(rng);

        Batches::new(x, y, order, self.batch_size)
    }

    /// Returns the validation split in batches, in order.
    pub fn val_batches(&self) -> Batches<'_> {
        let (x, y) = self.val_split();
        let order = (0..self.num_val()).collect();
        Batches::new(x, y, order, self.batch_size)
    }
}
