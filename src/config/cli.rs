use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 直接在掃描到的絕對路徑上進行讀寫
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data)?;
        Ok(())
    }
}
