//! Weighted attribute match between a query specification and one historical
//! project. Weights sum to 100, so the raw sum is already a percentage.

use crate::domain::model::{HistoricalProject, QuerySpecification};

pub const SIGN_TYPE_WEIGHT: f64 = 30.0;
pub const AREA_WEIGHT: f64 = 25.0;
pub const MATERIAL_WEIGHT: f64 = 20.0;
pub const QUALITY_WEIGHT: f64 = 15.0;
pub const COMPLEXITY_WEIGHT: f64 = 10.0;

/// Similarity in [0, 100].
pub fn score(spec: &QuerySpecification, project: &HistoricalProject) -> f64 {
    let mut total = 0.0;

    if spec.sign_type == project.sign_type {
        total += SIGN_TYPE_WEIGHT;
    }

    total += area_similarity(spec.area(), project.area());

    if material_matches(&spec.material_type, &project.material_type) {
        total += MATERIAL_WEIGHT;
    }

    if spec.quality == project.quality {
        total += QUALITY_WEIGHT;
    }

    if spec.complexity == project.complexity {
        total += COMPLEXITY_WEIGHT;
    }

    total
}

/// Relative-difference similarity of two areas, scaled to `AREA_WEIGHT`.
/// Symmetric in its arguments; 0 when either area is 0.
pub fn area_similarity(a: f64, b: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 {
        return 0.0;
    }
    let relative_diff = (a - b).abs() / a.max(b);
    AREA_WEIGHT * (1.0 - relative_diff)
}

fn material_matches(spec_material: &str, project_material: &str) -> bool {
    !spec_material.is_empty()
        && !project_material.is_empty()
        && spec_material.to_lowercase() == project_material.to_lowercase()
}
