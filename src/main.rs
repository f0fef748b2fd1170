use std::env;

use anyhow::Context;
use log::info;

use linear_regression::{arch::Model, spec::TrainingSpec, training::TrainerBuilder};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let spec = match env::args().nth(1) {
        Some(path) => TrainingSpec::from_json_file(&path)
            .with_context(|| format!("failed to load training spec from {path}"))?,
        None => TrainingSpec::default(),
    };
    info!("training spec: {spec:?}");

    let mut session = TrainerBuilder::new().build(&spec)?;
    session.run()?;

    let model = &session.model;
    info!(
        "learned w={:?} b={:.4}, true w={:?} b={:.4}",
        model.weights().to_vec(),
        model.bias(),
        spec.true_weights,
        spec.true_bias
    );
    info!(params = model.size(); "done");

    Ok(())
}
