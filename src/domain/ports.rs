use crate::domain::model::{CrosstabReport, SourceTables};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn jobs_file(&self) -> &str;
    fn professions_file(&self) -> &str;
    /// File name for the rendered grid; `None` prints to stdout.
    fn output_file(&self) -> Option<&str>;
    fn delimiter(&self) -> u8;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceTables>;
    async fn transform(&self, data: SourceTables) -> Result<CrosstabReport>;
    async fn load(&self, report: CrosstabReport) -> Result<String>;
}
