use std::fmt::{self, Display};

/// The outcome of a single batch update.
///
/// `Display` renders the progress line written after each batch, e.g.
/// `Epoch 1/10, Batch 3, Loss: 0.1235`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchReport {
    /// 1-based epoch index.
    pub epoch: usize,
    pub num_epochs: usize,
    /// 1-based batch index within the epoch.
    pub batch: usize,
    pub loss: f32,
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Epoch {}/{}, Batch {}, Loss: {:.4}",
            self.epoch, self.num_epochs, self.batch, self.loss
        )
    }
}

/// Losses observed during one epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochSummary {
    epoch: usize,
    batch_losses: Vec<f32>,
    val_loss: Option<f32>,
}

impl EpochSummary {
    pub fn new(epoch: usize, batch_losses: Vec<f32>, val_loss: Option<f32>) -> Self {
        Self {
            epoch,
            batch_losses,
            val_loss,
        }
    }

    /// Returns the 1-based index of this epoch.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Returns the training loss of each batch, in the order they were processed.
    pub fn batch_losses(&self) -> &[f32] {
        &self.batch_losses
    }

    pub fn num_batches(&self) -> usize {
        self.batch_losses.len()
    }

    /// Average of the batch losses, `None` for an epoch without batches.
    pub fn mean_loss(&self) -> Option<f32> {
        if self.batch_losses.is_empty() {
            return None;
        }

        Some(self.batch_losses.iter().sum::<f32>() / self.batch_losses.len() as f32)
    }

    pub fn last_loss(&self) -> Option<f32> {
        self.batch_losses.last().copied()
    }

    /// Mean loss over the validation split after this epoch, if there is one.
    pub fn val_loss(&self) -> Option<f32> {
        self.val_loss
    }
}
