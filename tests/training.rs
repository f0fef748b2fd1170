use std::num::NonZeroUsize;

use linear_regression::{
    arch::{Linear, Model, loss::Mse},
    dataset::SyntheticRegression,
    spec::TrainingSpec,
    training::{Trainer, TrainerBuilder},
};
use rand::{SeedableRng, rngs::StdRng};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn every_epoch_partitions_the_training_split() {
    let mut rng = StdRng::seed_from_u64(0);

    for (n, k) in [(1, 1), (7, 3), (32, 32), (33, 32), (1000, 32), (5, 100)] {
        let data = SyntheticRegression::new(vec![1.0, 2.0, 3.0], 0.5, nz(n), 3, nz(k))
            .generate(&mut rng)
            .unwrap();

        let batches: Vec<_> = data.train_batches(&mut rng).collect();
        assert_eq!(batches.len(), n.div_ceil(k), "n={n} k={k}");
        assert_eq!(data.num_train_batches(), batches.len());

        let (last, full) = batches.split_last().unwrap();
        assert!(full.iter().all(|b| b.len() == k));
        assert!(!last.is_empty() && last.len() <= k);

        let mut seen: Vec<usize> = batches.iter().flat_map(|b| b.indices.iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>(), "n={n} k={k}");
    }
}

#[test]
fn report_lines_count_epochs_and_batches_from_one() {
    let mut rng = StdRng::seed_from_u64(1);
    let data = SyntheticRegression::new(vec![2.0, -3.4], 4.2, nz(70), 10, nz(32))
        .generate(&mut rng)
        .unwrap();

    let mut model = Linear::new(2, &mut rng).unwrap();
    let optimizer = model.configure_optimizer(0.01);
    let mut trainer = Trainer::with_output(optimizer, Mse, 2, rng, Vec::new());
    trainer.fit(&mut model, &data).unwrap();

    let out = String::from_utf8(trainer.into_output()).unwrap();
    let prefixes: Vec<&str> = out
        .lines()
        .map(|line| line.split(", Loss: ").next().unwrap())
        .collect();

    assert_eq!(
        prefixes,
        [
            "Epoch 1/2, Batch 1",
            "Epoch 1/2, Batch 2",
            "Epoch 1/2, Batch 3",
            "Epoch 2/2, Batch 1",
            "Epoch 2/2, Batch 2",
            "Epoch 2/2, Batch 3",
        ]
    );

    for line in out.lines() {
        let loss = line.rsplit(": ").next().unwrap();
        let decimals = loss.split('.').nth(1).unwrap();
        assert_eq!(decimals.len(), 4, "{line}");
    }
}

#[test]
fn seeded_sessions_are_reproducible() {
    let spec = TrainingSpec::from_json_str(
        r#"{ "num_train": 64, "num_val": 16, "batch_size": 16, "num_epochs": 2, "seed": 3 }"#,
    )
    .unwrap();

    let a = TrainerBuilder::new().build(&spec).unwrap();
    let b = TrainerBuilder::new().build(&spec).unwrap();

    assert_eq!(a.data.features(), b.data.features());
    assert_eq!(a.model.params(), b.model.params());
}

#[test]
fn shape_mismatch_is_reported_as_an_error() {
    let mut rng = StdRng::seed_from_u64(2);
    let data = SyntheticRegression::new(vec![1.0; 4], 0.0, nz(8), 0, nz(4))
        .generate(&mut rng)
        .unwrap();

    let model = Linear::new(3, &mut rng).unwrap();
    let err = model.predict(data.features()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "There's a size mismatch in input features, got 4 and expected 3"
    );
}
