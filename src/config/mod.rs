pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::ConfigProvider;
    use crate::domain::model::{
        ComplexityTier, OutputFormat, ProjectSource, QualityTier, QuerySpecification, SignType,
    };
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, validate_url, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "sign-estimator")]
    #[command(about = "Estimate custom sign fabrication cost from historical projects")]
    pub struct CliConfig {
        /// Historical projects: a .csv/.json file or an http(s) endpoint returning JSON
        #[arg(long)]
        pub projects: String,

        #[arg(long)]
        pub sign_type: SignType,

        /// Height in feet
        #[arg(long)]
        pub height: f64,

        /// Width in feet
        #[arg(long)]
        pub width: f64,

        #[arg(long)]
        pub material: String,

        #[arg(long, default_value = "1")]
        pub paint_colors: u32,

        #[arg(long, help = "The sign includes lighting")]
        pub lighting: bool,

        #[arg(long)]
        pub quality: QualityTier,

        #[arg(long)]
        pub complexity: ComplexityTier,

        #[arg(long)]
        pub description: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_values_t = ["json".to_string(), "csv".to_string()])]
        pub formats: Vec<String>,

        #[arg(long, help = "Include historical project analytics in the report")]
        pub analytics: bool,

        #[arg(long, help = "Skip invalid historical records instead of failing")]
        pub skip_invalid: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn project_source(&self) -> ProjectSource {
            ProjectSource::from_location(&self.projects)
        }

        fn specification(&self) -> Result<QuerySpecification> {
            Ok(QuerySpecification {
                sign_type: self.sign_type,
                height: self.height,
                width: self.width,
                material_type: self.material.clone(),
                paint_colors: self.paint_colors,
                has_lighting: self.lighting,
                quality: self.quality,
                complexity: self.complexity,
                description: self.description.clone(),
            })
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            // 格式已在 validate() 檢查過
            super::parse_output_formats(&self.formats).unwrap_or_default()
        }

        fn include_analytics(&self) -> bool {
            self.analytics
        }

        fn skip_invalid_records(&self) -> bool {
            self.skip_invalid
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            match self.project_source() {
                ProjectSource::Http { endpoint, .. } => validate_url("projects", &endpoint)?,
                ProjectSource::File { path } => {
                    validate_path("projects", &path)?;
                    crate::utils::validation::validate_file_extension("projects", &path, &["csv", "json"])?;
                }
            }
            validate_path("output_path", &self.output_path)?;
            super::parse_output_formats(&self.formats)?;
            self.specification()?.validate()
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

use crate::domain::model::OutputFormat;
use crate::utils::error::{EstimatorError, Result};

pub(crate) fn parse_output_formats(formats: &[String]) -> Result<Vec<OutputFormat>> {
    let mut parsed = Vec::new();
    for format in formats {
        let value = match format.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => {
                return Err(EstimatorError::InvalidValueError {
                    field: "output_formats".to_string(),
                    value: format.clone(),
                    reason: "Unsupported format. Valid formats: json, csv".to_string(),
                })
            }
        };
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }

    if parsed.is_empty() {
        return Err(EstimatorError::ConfigValidationError {
            field: "output_formats".to_string(),
            message: "At least one output format is required".to_string(),
        });
    }

    Ok(parsed)
}
