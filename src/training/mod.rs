mod builder;
mod report;
mod trainer;

pub use builder::{Session, TrainerBuilder};
pub use report::{BatchReport, EpochSummary};
pub use trainer::Trainer;
