use crate::core::{BatchReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序處理每個輸入檔；單一檔案失敗只記錄並略過，不中斷整批
    pub async fn run(&self, inputs: &[String]) -> Result<BatchReport> {
        tracing::info!("🚀 Starting PESEL batch for {} file(s)", inputs.len());
        let mut report = BatchReport::new(inputs.len());

        for path in inputs {
            match self.process_file(path).await {
                Ok(file_report) => {
                    tracing::info!(
                        "✅ {}: {} processed ({} valid, {} invalid) -> {}",
                        file_report.path,
                        file_report.processed,
                        file_report.valid,
                        file_report.invalid,
                        file_report.output_path
                    );
                    report.add_file(file_report);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", path, e);
                    report.add_failure(path.as_str(), &e);
                }
            }
            self.monitor.log_stats(path);
        }

        self.monitor.log_final_stats();
        tracing::info!("📊 {}", report.summary());
        Ok(report)
    }

    async fn process_file(&self, path: &str) -> Result<crate::core::FileReport> {
        tracing::debug!("Extracting {}", path);
        let source = self.pipeline.extract(path).await?;
        tracing::debug!("Extracted {} lines from {}", source.lines.len(), path);

        let result = self.pipeline.transform(source).await?;
        tracing::debug!(
            "Decoded {} of {} lines",
            result.entries.len(),
            result.processed
        );

        self.pipeline.load(result).await
    }
}
