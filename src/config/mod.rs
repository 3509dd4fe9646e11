pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sidebar-sweep")]
#[command(about = "Bulk-removes <aside> sidebar blocks from static HTML files")]
pub struct CliConfig {
    /// 要掃描的根目錄，逗號分隔
    #[arg(long, value_delimiter = ',', default_values_t = [
        "public/archived".to_string(),
        "public/universities".to_string(),
    ])]
    pub roots: Vec<String>,

    #[arg(long, default_value = "8")]
    pub concurrent_tasks: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn roots(&self) -> &[String] {
        &self.roots
    }

    fn concurrent_tasks(&self) -> usize {
        self.concurrent_tasks
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("roots", &self.roots)?;
        for root in &self.roots {
            validate_path("roots", root)?;
        }
        validate_positive_number("concurrent_tasks", self.concurrent_tasks, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            roots: vec![
                "public/archived".to_string(),
                "public/universities".to_string(),
            ],
            concurrent_tasks: 8,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_default_style_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let mut config = base_config();
        config.concurrent_tasks = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_roots_rejected() {
        let mut config = base_config();
        config.roots.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_root_with_nul_byte_rejected() {
        let mut config = base_config();
        config.roots = vec!["bad\0root".to_string()];
        assert!(config.validate().is_err());
    }
}
