//! Maps the data store's `sign_projects` rows onto [`HistoricalProject`].
//!
//! Rows arrive either as a JSON array (REST export or HTTP endpoint) or as a
//! CSV file with a header row. Numeric columns may be encoded as strings in
//! JSON, which is how some stores return `numeric` columns.

use crate::domain::model::{CostEstimate, HistoricalProject};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, validate_positive};
use serde::Serialize;
use std::path::Path;

const NUMERIC_COLUMNS: [&str; 10] = [
    "height",
    "width",
    "total_cost",
    "material_cost",
    "labor_cost",
    "paint_colors",
    "totalCost",
    "materialCost",
    "laborCost",
    "paintColors",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(RecordFormat::Json),
            Some("csv") => Ok(RecordFormat::Csv),
            _ => Err(EstimatorError::InvalidValueError {
                field: "source.path".to_string(),
                value: path.to_string(),
                reason: "Historical projects must be a .json or .csv file".to_string(),
            }),
        }
    }
}

pub fn parse_projects(
    data: &[u8],
    format: RecordFormat,
    skip_invalid: bool,
) -> Result<Vec<HistoricalProject>> {
    let rows = match format {
        RecordFormat::Json => parse_json_rows(data)?,
        RecordFormat::Csv => parse_csv_rows(data)?,
    };

    let mut projects = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (offset, row) in rows.into_iter().enumerate() {
        let index = offset + 1;
        let outcome = row.and_then(|project| validate_record(index, &project).map(|_| project));

        match outcome {
            Ok(project) => projects.push(project),
            Err(e) if skip_invalid => {
                tracing::warn!("⚠️ Skipping project record #{}: {}", index, e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        tracing::info!("Skipped {} invalid project records", skipped);
    }
    tracing::debug!("Parsed {} project records ({:?})", projects.len(), format);

    Ok(projects)
}

// 每列各自解析，讓單筆錯誤可以被略過
fn parse_json_rows(data: &[u8]) -> Result<Vec<Result<HistoricalProject>>> {
    let value: serde_json::Value = serde_json::from_slice(data)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            _ => vec![serde_json::Value::Object(obj)],
        },
        other => {
            return Err(EstimatorError::DataSourceError {
                message: format!("Expected a JSON array of projects, got {}", other),
            })
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(offset, mut item)| {
            coerce_numeric_strings(&mut item);
            serde_json::from_value::<HistoricalProject>(item).map_err(|e| {
                EstimatorError::InvalidRecordError {
                    index: offset + 1,
                    reason: e.to_string(),
                }
            })
        })
        .collect())
}

fn coerce_numeric_strings(item: &mut serde_json::Value) {
    let serde_json::Value::Object(obj) = item else {
        return;
    };

    for column in NUMERIC_COLUMNS {
        let Some(value) = obj.get_mut(column) else {
            continue;
        };
        let parsed = value.as_str().and_then(|s| s.trim().parse::<f64>().ok());
        if let Some(number) = parsed {
            *value = if column.starts_with("paint") {
                serde_json::Value::from(number as u64)
            } else {
                serde_json::Value::from(number)
            };
        }
    }
}

fn parse_csv_rows(data: &[u8]) -> Result<Vec<Result<HistoricalProject>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    // 標頭讀取失敗代表整個檔案不可用
    reader.headers()?;

    Ok(reader
        .deserialize::<HistoricalProject>()
        .enumerate()
        .map(|(offset, row)| {
            row.map_err(|e| EstimatorError::InvalidRecordError {
                index: offset + 1,
                reason: e.to_string(),
            })
        })
        .collect())
}

pub fn validate_record(index: usize, project: &HistoricalProject) -> Result<()> {
    let checks = validate_non_empty_string("name", &project.name)
        .and_then(|_| validate_positive("height", project.height))
        .and_then(|_| validate_positive("width", project.width))
        .and_then(|_| validate_non_negative("total_cost", project.total_cost))
        .and_then(|_| validate_non_negative("material_cost", project.material_cost))
        .and_then(|_| validate_non_negative("labor_cost", project.labor_cost));

    checks.map_err(|e| EstimatorError::InvalidRecordError {
        index,
        reason: e.to_string(),
    })
}

#[derive(Debug, Serialize)]
struct SimilarProjectRow<'a> {
    rank: usize,
    similarity: String,
    id: &'a str,
    name: &'a str,
    sign_type: &'a str,
    height: f64,
    width: f64,
    material_type: &'a str,
    quality: &'a str,
    complexity: &'a str,
    has_lighting: bool,
    total_cost: f64,
}

/// One CSV row per supporting project, best match first.
pub fn similar_projects_csv(estimate: &CostEstimate) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if estimate.similar_projects.is_empty() {
        // csv 只在第一筆 serialize 時寫出標頭
        writer.write_record([
            "rank",
            "similarity",
            "id",
            "name",
            "sign_type",
            "height",
            "width",
            "material_type",
            "quality",
            "complexity",
            "has_lighting",
            "total_cost",
        ])?;
    }

    for (position, candidate) in estimate.similar_projects.iter().enumerate() {
        let project = &candidate.project;
        writer.serialize(SimilarProjectRow {
            rank: position + 1,
            similarity: format!("{:.1}", candidate.similarity),
            id: &project.id,
            name: &project.name,
            sign_type: project.sign_type.as_str(),
            height: project.height,
            width: project.width,
            material_type: &project.material_type,
            quality: project.quality.as_str(),
            complexity: project.complexity.as_str(),
            has_lighting: project.has_lighting,
            total_cost: project.total_cost,
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| EstimatorError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string())))
}
