pub mod analytics;
pub mod engine;
pub mod selector;
pub mod similarity;
pub mod synthesizer;

pub use crate::domain::model::{
    CostEstimate, EstimateReport, HistoricalProject, QuerySpecification, ScoredCandidate,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use synthesizer::estimate;
