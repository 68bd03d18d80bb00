pub mod pipelines;
pub mod summary;
