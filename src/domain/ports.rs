use crate::domain::model::{EstimateReport, HistoricalProject, OutputFormat, ProjectSource, QuerySpecification};
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
    fn project_source(&self) -> ProjectSource;
    fn specification(&self) -> Result<QuerySpecification>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    fn include_analytics(&self) -> bool;
    fn skip_invalid_records(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<HistoricalProject>>;
    async fn transform(&self, projects: Vec<HistoricalProject>) -> Result<EstimateReport>;
    async fn load(&self, report: &EstimateReport) -> Result<String>;
}
