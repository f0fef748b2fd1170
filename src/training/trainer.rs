use std::io::{self, Write};

use log::{debug, info};
use rand::Rng;

use super::{BatchReport, EpochSummary};
use crate::{
    Result,
    arch::{Model, loss::LossFn},
    dataset::SyntheticData,
    optimization::Optimizer,
};

/// Trains a model with minibatch gradient descent for a fixed amount of epochs.
///
/// After every batch a `BatchReport` line is written to `out`, which defaults
/// to standard output.
pub struct Trainer<O, L, R, W = io::Stdout>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
    W: Write,
{
    optimizer: O,
    loss_fn: L,
    num_epochs: usize,
    rng: R,
    out: W,
    grad: Vec<f32>,
}

impl<O, L, R> Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `Trainer` reporting to standard output.
    ///
    /// # Arguments
    /// * `optimizer` - The rule used to update the parameters after each batch.
    /// * `loss_fn` - The loss function minimized by the training.
    /// * `num_epochs` - The amount of passes over the training split.
    /// * `rng` - The random number generator used to shuffle each epoch.
    pub fn new(optimizer: O, loss_fn: L, num_epochs: usize, rng: R) -> Self {
        Self::with_output(optimizer, loss_fn, num_epochs, rng, io::stdout())
    }
}

impl<O, L, R, W> Trainer<O, L, R, W>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
    W: Write,
{
    /// Returns a new `Trainer` that writes its per-batch reports to `out`.
    pub fn with_output(optimizer: O, loss_fn: L, num_epochs: usize, rng: R, out: W) -> Self {
        Self {
            optimizer,
            loss_fn,
            num_epochs,
            rng,
            out,
            grad: Vec::new(),
        }
    }

    pub fn num_epochs(&self) -> usize {
        self.num_epochs
    }

    /// Consumes the trainer, returning its report sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Trains `model` for `num_epochs` epochs, one after the other.
    ///
    /// # Returns
    /// The summary of every epoch, or the first error found.
    pub fn fit<M: Model>(
        &mut self,
        model: &mut M,
        data: &SyntheticData,
    ) -> Result<Vec<EpochSummary>> {
        info!(
            epochs = self.num_epochs,
            batches = data.num_train_batches(),
            params = model.size();
            "starting training"
        );

        let mut summaries = Vec::with_capacity(self.num_epochs);
        for epoch in 1..=self.num_epochs {
            summaries.push(self.fit_epoch(epoch, model, data)?);
        }

        Ok(summaries)
    }

    /// Makes one pass over a freshly shuffled training split, updating the
    /// parameters of `model` after every batch.
    ///
    /// # Arguments
    /// * `epoch` - The 1-based index of this epoch, used for reporting.
    /// * `model` - The model being trained.
    /// * `data` - The dataset to train on.
    pub fn fit_epoch<M: Model>(
        &mut self,
        epoch: usize,
        model: &mut M,
        data: &SyntheticData,
    ) -> Result<EpochSummary> {
        self.grad.resize(model.size(), 0.0);
        let mut batch_losses = Vec::with_capacity(data.num_train_batches());

        for (i, batch) in data.train_batches(&mut self.rng).enumerate() {
            self.grad.fill(0.0);

            let y_pred = model.forward(batch.x.view())?;
            let loss = self.loss_fn.loss(y_pred.view(), batch.y.view())?;

            let d = self.loss_fn.loss_prime(y_pred.view(), batch.y.view())?;
            model.backward(batch.x.view(), d.view(), &mut self.grad)?;
            model.step(&mut self.optimizer, &self.grad)?;

            let report = BatchReport {
                epoch,
                num_epochs: self.num_epochs,
                batch: i + 1,
                loss,
            };
            writeln!(self.out, "{report}")?;
            debug!(epoch = epoch, batch = i + 1, size = batch.len(); "loss {loss}");

            batch_losses.push(loss);
        }

        let val_loss = self.evaluate(model, data)?;
        let summary = EpochSummary::new(epoch, batch_losses, val_loss);

        match (summary.mean_loss(), val_loss) {
            (Some(train), Some(val)) => {
                info!(epoch = epoch; "train_loss={train:.6} val_loss={val:.6}")
            }
            (Some(train), None) => info!(epoch = epoch; "train_loss={train:.6}"),
            _ => {}
        }

        Ok(summary)
    }

    /// Computes the mean loss of `model` over the validation split, without
    /// touching its parameters.
    ///
    /// # Returns
    /// `None` if the dataset has no validation split.
    pub fn evaluate<M: Model>(&self, model: &M, data: &SyntheticData) -> Result<Option<f32>> {
        if data.num_val() == 0 {
            return Ok(None);
        }

        let mut total = 0.0;
        for batch in data.val_batches() {
            let y_pred = model.forward(batch.x.view())?;
            total += self.loss_fn.loss(y_pred.view(), batch.y.view())? * batch.len() as f32;
        }

        Ok(Some(total / data.num_val() as f32))
    }
}
