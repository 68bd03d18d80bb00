// Adapters layer: translation between external data formats and the domain model.

pub mod project_records;
