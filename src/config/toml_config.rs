use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, ProjectSource, QuerySpecification};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub estimator: EstimatorInfo,
    pub source: SourceConfig,
    pub specification: QuerySpecification,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "file" 或 "http"
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub skip_invalid_records: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub include_analytics: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "compact" (default) or "json"
    pub format: Option<String>,
    pub level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("estimator.name", &self.estimator.name)?;

        match self.source.r#type.as_str() {
            "file" => {
                let path = validation::validate_required_field("source.path", &self.source.path)?;
                validation::validate_path("source.path", path)?;
                validation::validate_file_extension("source.path", path, &["csv", "json"])?;
            }
            "http" => {
                let endpoint =
                    validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                validation::validate_url("source.endpoint", endpoint)?;
            }
            other => {
                return Err(EstimatorError::InvalidValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Supported source types: file, http".to_string(),
                })
            }
        }

        validation::validate_path("output.output_path", &self.output.output_path)?;
        super::parse_output_formats(&self.output.formats)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !matches!(format, "compact" | "json") {
                return Err(EstimatorError::InvalidValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Supported log formats: compact, json".to_string(),
                });
            }
        }

        self.specification.validate()
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|f| f == "json")
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn project_source(&self) -> ProjectSource {
        if self.source.r#type == "http" {
            ProjectSource::Http {
                endpoint: self.source.endpoint.clone().unwrap_or_default(),
                headers: self
                    .source
                    .headers
                    .clone()
                    .unwrap_or_default()
                    .into_iter()
                    .collect(),
            }
        } else {
            ProjectSource::File {
                path: self.source.path.clone().unwrap_or_default(),
            }
        }
    }

    fn specification(&self) -> Result<QuerySpecification> {
        Ok(self.specification.clone())
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        super::parse_output_formats(&self.output.formats).unwrap_or_default()
    }

    fn include_analytics(&self) -> bool {
        self.output.include_analytics.unwrap_or(false)
    }

    fn skip_invalid_records(&self) -> bool {
        self.source.skip_invalid_records.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
