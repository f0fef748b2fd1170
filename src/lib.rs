//! Linear regression trained with minibatch gradient descent on synthetic data.
//!
//! A [`dataset::SyntheticRegression`] samples features and targets from a known
//! linear function, an [`arch::Linear`] model is fitted to them by a
//! [`training::Trainer`], which reports the loss of every batch as it goes.

pub mod arch;
pub mod dataset;
pub mod error;
pub mod optimization;
pub mod spec;
pub mod training;

pub use error::{MlErr, Result};
