pub mod estimate_pipeline;

pub use estimate_pipeline::EstimatePipeline;
