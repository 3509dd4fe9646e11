use crate::core::Pipeline;
use crate::domain::model::SweepSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct SweepEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> SweepEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<SweepSummary> {
        tracing::info!("Scanning for HTML files...");
        let files = self.pipeline.scan().await?;
        self.monitor.log_stats("Scan");

        if files.is_empty() {
            tracing::warn!("未發現任何 HTML 檔案，程式結束。");
            return Ok(SweepSummary::default());
        }

        let discovered = files.len();
        tracing::info!("🚀 開始並行處理共 {} 個檔案...", discovered);

        let result = self.pipeline.clean(files).await?;
        self.monitor.log_stats("Clean");

        let summary = self.pipeline.report(discovered, result).await?;
        self.monitor.log_final_stats(summary.files_discovered);

        Ok(summary)
    }
}
