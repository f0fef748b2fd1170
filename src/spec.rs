use std::{fs, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, dataset::DEFAULT_NOISE_STD};

const DEFAULT_NUM_TRAIN: NonZeroUsize = NonZeroUsize::new(1000).unwrap();
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(32).unwrap();

/// The parameters of a training run: how to generate the data and how to train on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSpec {
    pub true_weights: Vec<f32>,
    pub true_bias: f32,
    pub noise_std: f32,
    pub num_train: NonZeroUsize,
    pub num_val: usize,
    pub batch_size: NonZeroUsize,
    pub learning_rate: f32,
    pub num_epochs: usize,
    pub seed: Option<u64>,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        Self {
            true_weights: vec![2.0, -3.4],
            true_bias: 4.2,
            noise_std: DEFAULT_NOISE_STD,
            num_train: DEFAULT_NUM_TRAIN,
            num_val: 1000,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: 0.01,
            num_epochs: 10,
            seed: None,
        }
    }
}

impl TrainingSpec {
    /// Parses a spec from a JSON document. Missing fields take their default value.
    ///
    /// # Errors
    /// `MlErr::Json` if the document is malformed, or any error from `validate`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reads and parses a spec from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks the values serde can't check on its own.
    ///
    /// # Errors
    /// `MlErr::InvalidSpec` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.true_weights.is_empty() {
            return Err(MlErr::InvalidSpec("true_weights must not be empty"));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(MlErr::InvalidSpec(
                "learning_rate must be a positive finite number",
            ));
        }

        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(MlErr::InvalidSpec(
                "noise_std must be a non-negative finite number",
            ));
        }

        Ok(())
    }
}
