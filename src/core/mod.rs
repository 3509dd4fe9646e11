pub mod engine;
pub mod pipeline;
pub mod stripper;

pub use crate::domain::model::{CleanResult, FileOutcome, SweepSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
