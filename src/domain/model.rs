use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignType {
    Pylon,
    ChannelLetters,
    Monument,
    Wall,
    FlatCutout,
}

impl SignType {
    pub const ALL: [SignType; 5] = [
        SignType::Pylon,
        SignType::ChannelLetters,
        SignType::Monument,
        SignType::Wall,
        SignType::FlatCutout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignType::Pylon => "pylon",
            SignType::ChannelLetters => "channel_letters",
            SignType::Monument => "monument",
            SignType::Wall => "wall",
            SignType::FlatCutout => "flat_cutout",
        }
    }

    /// Human readable name, e.g. "Channel Letters".
    pub fn label(&self) -> &'static str {
        match self {
            SignType::Pylon => "Pylon",
            SignType::ChannelLetters => "Channel Letters",
            SignType::Monument => "Monument",
            SignType::Wall => "Wall",
            SignType::FlatCutout => "Flat Cutout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Basic,
    Standard,
    Premium,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [QualityTier::Basic, QualityTier::Standard, QualityTier::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Basic => "basic",
            QualityTier::Standard => "standard",
            QualityTier::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 3] = [ComplexityTier::Low, ComplexityTier::Medium, ComplexityTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityTier::Low => "low",
            ComplexityTier::Medium => "medium",
            ComplexityTier::High => "high",
        }
    }
}

macro_rules! impl_tier_text {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EstimatorError;

            fn from_str(s: &str) -> Result<Self> {
                let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| EstimatorError::InvalidValueError {
                        field: $field.to_string(),
                        value: s.to_string(),
                        reason: format!(
                            "Expected one of: {}",
                            <$ty>::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
                        ),
                    })
            }
        }
    };
}

impl_tier_text!(SignType, "sign_type");
impl_tier_text!(QualityTier, "quality");
impl_tier_text!(ComplexityTier, "complexity");

/// A completed project as stored in the data store. Field names follow the
/// store's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalProject {
    pub id: String,
    pub name: String,
    #[serde(alias = "signType")]
    pub sign_type: SignType,
    pub height: f64,
    pub width: f64,
    #[serde(alias = "materialType")]
    pub material_type: String,
    #[serde(default = "default_paint_colors", alias = "paintColors")]
    pub paint_colors: u32,
    #[serde(default, alias = "hasLighting")]
    pub has_lighting: bool,
    pub quality: QualityTier,
    pub complexity: ComplexityTier,
    #[serde(alias = "totalCost")]
    pub total_cost: f64,
    #[serde(default, alias = "materialCost")]
    pub material_cost: f64,
    #[serde(default, alias = "laborCost")]
    pub labor_cost: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn default_paint_colors() -> u32 {
    1
}

impl HistoricalProject {
    pub fn area(&self) -> f64 {
        clamped_area(self.height, self.width)
    }
}

/// The sign being estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpecification {
    pub sign_type: SignType,
    pub height: f64,
    pub width: f64,
    pub material_type: String,
    #[serde(default = "default_paint_colors")]
    pub paint_colors: u32,
    #[serde(default)]
    pub has_lighting: bool,
    pub quality: QualityTier,
    pub complexity: ComplexityTier,
    #[serde(default)]
    pub description: Option<String>,
}

impl QuerySpecification {
    pub fn area(&self) -> f64 {
        clamped_area(self.height, self.width)
    }
}

impl Validate for QuerySpecification {
    fn validate(&self) -> Result<()> {
        validate_positive("specification.height", self.height)?;
        validate_positive("specification.width", self.width)?;
        validate_non_empty_string("specification.material_type", &self.material_type)?;
        Ok(())
    }
}

// 負值尺寸視為 0，面積項因此歸零
pub(crate) fn clamped_area(height: f64, width: f64) -> f64 {
    height.max(0.0) * width.max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub project: HistoricalProject,
    /// Similarity percentage in [0, 100].
    pub similarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateBasis {
    /// No historical projects were available.
    NoHistory,
    /// Nothing matched; area-based formula was used.
    Formula,
    /// Similarity-weighted average over matching projects.
    SimilarProjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 70.0 {
            ConfidenceLevel::High
        } else if confidence > 40.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        };
        f.write_str(text)
    }
}

/// Result of one estimate call.
///
/// In the `SimilarProjects` basis the range comes from the raw candidate costs
/// while the average is similarity weighted, so `min_cost <= average_cost <=
/// max_cost` is not guaranteed there. `min_cost <= max_cost` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub min_cost: f64,
    pub max_cost: f64,
    pub average_cost: f64,
    pub confidence: f64,
    pub basis: EstimateBasis,
    pub similar_projects: Vec<ScoredCandidate>,
}

impl CostEstimate {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

/// Everything the load phase writes out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    pub specification: QuerySpecification,
    pub historical_count: usize,
    pub estimate: CostEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<ProjectAnalytics>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCostSummary {
    pub quality: QualityTier,
    pub average_cost: f64,
    pub total_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// `YYYY-MM`
    pub month: String,
    pub projects: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalytics {
    pub total_projects: usize,
    pub total_revenue: f64,
    pub average_project_cost: f64,
    pub average_area: f64,
    pub sign_type_distribution: Vec<(SignType, usize)>,
    pub cost_by_quality: Vec<QualityCostSummary>,
    pub monthly: Vec<MonthlySummary>,
}

/// Where historical projects are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSource {
    File { path: String },
    Http {
        endpoint: String,
        headers: Vec<(String, String)>,
    },
}

impl ProjectSource {
    /// `http(s)://` locations become an HTTP source, anything else a file path.
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ProjectSource::Http {
                endpoint: location.to_string(),
                headers: Vec::new(),
            }
        } else {
            ProjectSource::File {
                path: location.to_string(),
            }
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            ProjectSource::File { path } => path,
            ProjectSource::Http { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "estimate.json",
            OutputFormat::Csv => "similar_projects.csv",
        }
    }
}
