use crate::adapters::project_records::{self, RecordFormat};
use crate::core::{analytics, synthesizer, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{EstimateReport, HistoricalProject, OutputFormat, ProjectSource};
use crate::utils::error::{EstimatorError, Result};
use reqwest::Client;
use std::path::Path;

pub struct EstimatePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> EstimatePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    async fn fetch_remote(&self, endpoint: &str, headers: &[(String, String)]) -> Result<Vec<u8>> {
        tracing::debug!("Requesting historical projects from: {}", endpoint);

        let mut request = self.client.get(endpoint);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        tracing::debug!("Data store response status: {}", response.status());

        if !response.status().is_success() {
            return Err(EstimatorError::DataSourceError {
                message: format!("{} responded with status {}", endpoint, response.status()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn output_file(&self, format: OutputFormat) -> String {
        Path::new(self.config.output_path())
            .join(format.file_name())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EstimatePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<HistoricalProject>> {
        let skip_invalid = self.config.skip_invalid_records();

        match self.config.project_source() {
            ProjectSource::File { path } => {
                let format = RecordFormat::from_path(&path)?;
                tracing::debug!("Reading historical projects from file: {}", path);
                let data = self.storage.read_file(&path).await?;
                project_records::parse_projects(&data, format, skip_invalid)
            }
            ProjectSource::Http { endpoint, headers } => {
                let data = self.fetch_remote(&endpoint, &headers).await?;
                project_records::parse_projects(&data, RecordFormat::Json, skip_invalid)
            }
        }
    }

    async fn transform(&self, projects: Vec<HistoricalProject>) -> Result<EstimateReport> {
        let specification = self.config.specification()?;

        let estimate = synthesizer::estimate(&specification, &projects);
        let analytics = self
            .config
            .include_analytics()
            .then(|| analytics::summarize(&projects));

        Ok(EstimateReport {
            specification,
            historical_count: projects.len(),
            estimate,
            analytics,
            generated_at: chrono::Utc::now(),
        })
    }

    async fn load(&self, report: &EstimateReport) -> Result<String> {
        let formats = self.config.output_formats();
        tracing::debug!("Writing {} report files", formats.len());

        for format in formats {
            let data = match format {
                OutputFormat::Json => serde_json::to_vec_pretty(report)?,
                OutputFormat::Csv => project_records::similar_projects_csv(&report.estimate)?,
            };
            let path = self.output_file(format);
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, &data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}
