use crate::core::Pipeline;
use crate::domain::model::EstimateReport;
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct EstimationOutcome {
    pub output_path: String,
    pub report: EstimateReport,
}

pub struct EstimationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EstimationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<EstimationOutcome> {
        let started = Instant::now();
        tracing::info!("🚀 Starting cost estimation");

        // Extract
        tracing::info!("📥 Loading historical projects...");
        let projects = self.pipeline.extract().await?;
        tracing::info!("Loaded {} historical projects", projects.len());

        // Transform
        tracing::info!("🧮 Estimating...");
        let report = self.pipeline.transform(projects).await?;
        tracing::info!(
            "Estimate {:.2} (range {:.2} - {:.2}), confidence {:.0}% via {:?}",
            report.estimate.average_cost,
            report.estimate.min_cost,
            report.estimate.max_cost,
            report.estimate.confidence,
            report.estimate.basis
        );

        // Load
        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("📁 Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(EstimationOutcome {
            output_path,
            report,
        })
    }
}
