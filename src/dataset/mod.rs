mod batches;
mod synthetic;

pub use batches::{Batch, Batches};
pub use synthetic::{DEFAULT_NOISE_STD, SyntheticData, SyntheticRegression};
