use crate::core::Pipeline;
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

    /// Runs extract, transform and load. Returns where the grid was written.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting crosstab run");

        // Extract
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} job rows and {} profession rows",
            tables.jobs.len().saturating_sub(1),
            tables.professions.len().saturating_sub(1)
        );
        self.monitor.log_stats("extract");

        // Transform
        let report = self.pipeline.transform(tables).await?;
        tracing::info!(
            "Counted {} postings across {} contract types and {} categories",
            report.job_count,
            report.matrix.contracts().len() - 1,
            report.matrix.categories().len() - 1
        );
        self.monitor.log_stats("transform");

        // Load
        let destination = self.pipeline.load(report).await?;
        tracing::info!("Crosstab written to {}", destination);
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(destination)
    }
}
