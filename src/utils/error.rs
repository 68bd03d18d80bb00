use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Data store request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid project record #{index}: {reason}")]
    InvalidRecordError { index: usize, reason: String },

    #[error("Data source error: {message}")]
    DataSourceError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    DataSource,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::MissingConfigError { .. }
            | EstimatorError::InvalidValueError { .. } => ErrorCategory::Configuration,
            EstimatorError::ApiError(_) | EstimatorError::DataSourceError { .. } => {
                ErrorCategory::DataSource
            }
            EstimatorError::CsvError(_)
            | EstimatorError::SerializationError(_)
            | EstimatorError::InvalidRecordError { .. }
            | EstimatorError::ValidationError { .. } => ErrorCategory::Data,
            EstimatorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 連線問題通常可以重試
            EstimatorError::ApiError(_) | EstimatorError::DataSourceError { .. } => {
                ErrorSeverity::Medium
            }
            EstimatorError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or the TOML configuration file"
            }
            ErrorCategory::DataSource => {
                "Verify the data store endpoint is reachable and returns a JSON array of projects"
            }
            ErrorCategory::Data => {
                "Inspect the historical project file for missing columns or invalid values"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimatorError::InvalidRecordError { index, reason } => {
                format!("Project record #{} could not be used: {}", index, reason)
            }
            EstimatorError::ApiError(_) | EstimatorError::DataSourceError { .. } => {
                format!("Could not load historical projects ({})", self)
            }
            _ => self.to_string(),
        }
    }

    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
