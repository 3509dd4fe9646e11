use crate::domain::model::{CleanResult, SweepSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roots(&self) -> &[String];
    fn concurrent_tasks(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn scan(&self) -> Result<Vec<PathBuf>>;
    async fn clean(&self, files: Vec<PathBuf>) -> Result<CleanResult>;
    async fn report(&self, files_discovered: usize, result: CleanResult) -> Result<SweepSummary>;
}
