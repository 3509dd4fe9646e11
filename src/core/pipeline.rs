use crate::core::stripper::{byte_delta, AsideStripper};
use crate::core::{CleanResult, ConfigProvider, FileOutcome, Pipeline, Storage, SweepSummary};
use crate::utils::error::{Result, SweepError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

pub struct SweepPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    stripper: AsideStripper,
}

impl<S: Storage, C: ConfigProvider> SweepPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        Ok(Self {
            storage,
            config,
            stripper: AsideStripper::new()?,
        })
    }
}

/// 單一檔案的讀取-清理-寫回
async fn process_file<S: Storage>(
    storage: &S,
    stripper: &AsideStripper,
    path: &Path,
) -> Result<FileOutcome> {
    let raw = storage.read_file(path).await?;
    let original = String::from_utf8(raw).map_err(|_| SweepError::EncodingError {
        path: path.display().to_string(),
    })?;

    let (stripped, asides_removed) = stripper.strip(&original);
    let bytes_removed = byte_delta(&original, &stripped);

    storage.write_file(path, stripped.as_bytes()).await?;

    // 寫回之後才擷取標題，缺少標題的檔案視為處理失敗
    let title = stripper
        .page_title(&original)
        .ok_or_else(|| SweepError::TitleNotFound {
            path: path.display().to_string(),
        })?;

    Ok(FileOutcome {
        path: path.to_path_buf(),
        title,
        asides_removed,
        bytes_removed,
    })
}

#[async_trait::async_trait]
impl<S, C> Pipeline for SweepPipeline<S, C>
where
    S: Storage + Clone + 'static,
    C: ConfigProvider,
{
    async fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut all_files = Vec::new();

        for root in self.config.roots() {
            let root_path = Path::new(root);
            if !root_path.exists() {
                tracing::warn!("⚠️ 路徑不存在: {}", root);
                continue;
            }

            let mut found = 0usize;
            for entry in WalkDir::new(root_path) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!("⚠️ 無法讀取目錄項目: {}", e);
                        continue;
                    }
                };

                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|ext| ext.to_str()) == Some("html")
                {
                    all_files.push(entry.into_path());
                    found += 1;
                }
            }

            tracing::info!("在目錄 [{}] 中找到 {} 個檔案", root, found);
        }

        Ok(all_files)
    }

    async fn clean(&self, files: Vec<PathBuf>) -> Result<CleanResult> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_tasks()));
        let mut tasks: JoinSet<(PathBuf, Result<FileOutcome>)> = JoinSet::new();

        for path in files {
            // 取得許可後才派工，同時在途的任務數以此為上限
            let permit = semaphore.clone().acquire_owned().await.map_err(|e| {
                SweepError::ProcessingError {
                    message: format!("worker pool closed: {}", e),
                }
            })?;

            let storage = self.storage.clone();
            let stripper = self.stripper.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let outcome = process_file(&storage, &stripper, &path).await;
                (path, outcome)
            });
        }

        let mut result = CleanResult::default();
        while let Some(joined) = tasks.join_next().await {
            let (path, outcome) = joined?;
            match outcome {
                Ok(outcome) => {
                    tracing::info!("處理中: {}", outcome.title);
                    result.outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::warn!("❌ 出錯 {}: {}", path.display(), e);
                    result.failed_files += 1;
                }
            }
        }

        Ok(result)
    }

    async fn report(&self, files_discovered: usize, result: CleanResult) -> Result<SweepSummary> {
        let summary = SweepSummary {
            roots_configured: self.config.roots().len(),
            files_discovered,
            files_cleaned: result.outcomes.len(),
            files_failed: result.failed_files,
            bytes_removed: result.bytes_removed(),
        };

        println!();
        println!("{}", "=".repeat(40));
        println!("✅ 任務完成報告");
        println!("📂 總處理目錄數: {}", summary.roots_configured);
        println!("📄 總處理檔案數: {}", summary.files_discovered);
        println!("🧹 累計清理數據: {:.2} MB", summary.megabytes_removed());
        println!("{}", "=".repeat(40));

        tracing::debug!("summary: {}", serde_json::to_string(&summary)?);

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn insert(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(PathBuf::from(path), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SweepError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        roots: Vec<String>,
        concurrent_tasks: usize,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                roots: vec!["public/archived".to_string()],
                concurrent_tasks: 4,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn roots(&self) -> &[String] {
            &self.roots
        }

        fn concurrent_tasks(&self) -> usize {
            self.concurrent_tasks
        }
    }

    fn page(title: &str, body: &str) -> String {
        format!(
            r#"<html><head><meta property="og:title" content="{}" /></head><body>{}</body></html>"#,
            title, body
        )
    }

    #[tokio::test]
    async fn test_clean_strips_aside_and_reports_delta() {
        let storage = MockStorage::new();
        let content = page("北京大學", "<aside><nav>sidebar</nav></aside><p>main</p>");
        storage.insert("a.html", content.as_bytes()).await;

        let pipeline = SweepPipeline::new(storage.clone(), MockConfig::new()).unwrap();
        let result = pipeline.clean(vec![PathBuf::from("a.html")]).await.unwrap();

        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.failed_files, 0);

        let outcome = &result.outcomes[0];
        assert_eq!(outcome.title, "北京大學");
        assert_eq!(outcome.asides_removed, 1);
        assert_eq!(
            outcome.bytes_removed,
            "<aside><nav>sidebar</nav></aside>".len() as u64
        );

        let written = storage.get_file("a.html").await.unwrap();
        let written = String::from_utf8(written).unwrap();
        assert!(!written.contains("<aside"));
        assert!(written.contains("<p>main</p>"));
    }

    #[tokio::test]
    async fn test_clean_counts_unreadable_file_as_failed() {
        let storage = MockStorage::new();
        let pipeline = SweepPipeline::new(storage, MockConfig::new()).unwrap();

        let result = pipeline
            .clean(vec![PathBuf::from("missing.html")])
            .await
            .unwrap();

        assert_eq!(result.outcomes.len(), 0);
        assert_eq!(result.failed_files, 1);
        assert_eq!(result.bytes_removed(), 0);
    }

    #[tokio::test]
    async fn test_clean_missing_title_fails_after_write() {
        let storage = MockStorage::new();
        // 沒有 og:title 的頁面：寫回已發生，但計為失敗
        let content = "<html><body><aside>x</aside><p>kept</p></body></html>";
        storage.insert("untitled.html", content.as_bytes()).await;

        let pipeline = SweepPipeline::new(storage.clone(), MockConfig::new()).unwrap();
        let result = pipeline
            .clean(vec![PathBuf::from("untitled.html")])
            .await
            .unwrap();

        assert_eq!(result.failed_files, 1);
        assert_eq!(result.bytes_removed(), 0);

        let written = storage.get_file("untitled.html").await.unwrap();
        let written = String::from_utf8(written).unwrap();
        assert!(!written.contains("<aside"));
        assert!(written.contains("<p>kept</p>"));
    }

    #[tokio::test]
    async fn test_clean_non_utf8_file_is_failed_and_untouched() {
        let storage = MockStorage::new();
        let garbage = [0xff, 0xfe, 0x00, 0x41];
        storage.insert("binary.html", &garbage).await;

        let pipeline = SweepPipeline::new(storage.clone(), MockConfig::new()).unwrap();
        let result = pipeline
            .clean(vec![PathBuf::from("binary.html")])
            .await
            .unwrap();

        assert_eq!(result.failed_files, 1);
        assert_eq!(storage.get_file("binary.html").await.unwrap(), garbage);
    }

    #[tokio::test]
    async fn test_clean_aside_free_file_has_zero_delta() {
        let storage = MockStorage::new();
        let content = page("清華大學", "<p>no sidebar</p>");
        storage.insert("plain.html", content.as_bytes()).await;

        let pipeline = SweepPipeline::new(storage.clone(), MockConfig::new()).unwrap();
        let result = pipeline
            .clean(vec![PathBuf::from("plain.html")])
            .await
            .unwrap();

        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.outcomes[0].bytes_removed, 0);
        assert_eq!(result.outcomes[0].asides_removed, 0);

        let written = storage.get_file("plain.html").await.unwrap();
        assert_eq!(written, content.as_bytes());
    }

    #[tokio::test]
    async fn test_clean_many_files_with_bounded_pool() {
        let storage = MockStorage::new();
        for i in 0..20 {
            let content = page("測試頁面", "<aside>s</aside><p>b</p>");
            storage
                .insert(&format!("f{}.html", i), content.as_bytes())
                .await;
        }

        let config = MockConfig {
            roots: vec!["public/archived".to_string()],
            concurrent_tasks: 3,
        };
        let pipeline = SweepPipeline::new(storage, config).unwrap();

        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("f{}.html", i))).collect();
        let result = pipeline.clean(files).await.unwrap();

        assert_eq!(result.outcomes.len(), 20);
        assert_eq!(result.failed_files, 0);
        assert_eq!(
            result.bytes_removed(),
            20 * "<aside>s</aside>".len() as u64
        );
    }

    #[tokio::test]
    async fn test_report_sums_deltas_and_counts() {
        let storage = MockStorage::new();
        let pipeline = SweepPipeline::new(storage, MockConfig::new()).unwrap();

        let result = CleanResult {
            outcomes: vec![
                FileOutcome {
                    path: PathBuf::from("a.html"),
                    title: "甲".to_string(),
                    asides_removed: 1,
                    bytes_removed: 1024,
                },
                FileOutcome {
                    path: PathBuf::from("b.html"),
                    title: "乙".to_string(),
                    asides_removed: 2,
                    bytes_removed: 2048,
                },
            ],
            failed_files: 1,
        };

        let summary = pipeline.report(3, result).await.unwrap();

        assert_eq!(summary.roots_configured, 1);
        assert_eq!(summary.files_discovered, 3);
        assert_eq!(summary.files_cleaned, 2);
        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.bytes_removed, 3072);
    }
}
