pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::EstimatePipeline;
pub use app::summary::render_summary;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{engine::EstimationEngine, estimate};
pub use domain::model::{
    ComplexityTier, ConfidenceLevel, CostEstimate, EstimateBasis, EstimateReport, HistoricalProject,
    QualityTier, QuerySpecification, ScoredCandidate, SignType,
};
pub use utils::error::{EstimatorError, Result};
