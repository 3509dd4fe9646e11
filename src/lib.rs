pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub mod config;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{engine::SweepEngine, pipeline::SweepPipeline, stripper::AsideStripper};
pub use crate::domain::model::{CleanResult, FileOutcome, SweepSummary};
pub use crate::utils::error::{Result, SweepError};
