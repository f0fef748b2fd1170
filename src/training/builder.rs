use log::debug;
use rand::{SeedableRng, rngs::StdRng};

use super::{EpochSummary, Trainer};
use crate::{
    Result,
    arch::{Linear, loss::Mse},
    dataset::{SyntheticData, SyntheticRegression},
    optimization::GradientDescent,
    spec::TrainingSpec,
};

/// Everything a training run needs, ready to `run`.
pub struct Session {
    pub data: SyntheticData,
    pub model: Linear,
    pub trainer: Trainer<GradientDescent, Mse, StdRng>,
}

impl Session {
    /// Fits the model on the data, returning the summary of every epoch.
    pub fn run(&mut self) -> Result<Vec<EpochSummary>> {
        self.trainer.fit(&mut self.model, &self.data)
    }
}

/// Builds training `Session`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Session` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the run.
    ///
    /// # Errors
    /// Any error from `TrainingSpec::validate` or from the data generation.
    pub fn build(&self, spec: &TrainingSpec) -> Result<Session> {
        spec.validate()?;

        let mut rng = self.generate_rng(spec.seed);

        let data = SyntheticRegression::new(
            spec.true_weights.clone(),
            spec.true_bias,
            spec.num_train,
            spec.num_val,
            spec.batch_size,
        )
        .with_noise_std(spec.noise_std)
        .generate(&mut rng)?;

        debug!(
            rows = data.len(),
            features = data.num_features();
            "generated synthetic dataset"
        );

        let model = Linear::new(data.num_features(), &mut rng)?;
        let optimizer = model.configure_optimizer(spec.learning_rate);
        let trainer = Trainer::new(optimizer, Mse::new(), spec.num_epochs, rng);

        Ok(Session {
            data,
            model,
            trainer,
        })
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MlErr, arch::Model};

    #[test]
    fn builds_from_the_default_spec() {
        let session = TrainerBuilder::new()
            .build(&TrainingSpec::default())
            .unwrap();

        assert_eq!(session.data.len(), 2000);
        assert_eq!(session.data.num_train_batches(), 32);
        assert_eq!(session.model.num_inputs(), 2);
        assert_eq!(session.model.size(), 3);
        assert_eq!(session.trainer.num_epochs(), 10);
    }

    #[test]
    fn same_seed_builds_the_same_session() {
        let spec = TrainingSpec {
            seed: Some(11),
            ..Default::default()
        };

        let a = TrainerBuilder::new().build(&spec).unwrap();
        let b = TrainerBuilder::new().build(&spec).unwrap();

        assert_eq!(a.data.targets(), b.data.targets());
        assert_eq!(a.model, b.model);
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let spec = TrainingSpec {
            learning_rate: -1.0,
            ..Default::default()
        };

        let err = TrainerBuilder::new().build(&spec).err().unwrap();
        assert!(matches!(err, MlErr::InvalidSpec(_)));
    }
}
