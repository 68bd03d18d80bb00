use crate::core::selector::select_candidates;
use crate::domain::model::{
    ComplexityTier, CostEstimate, EstimateBasis, HistoricalProject, QualityTier, QuerySpecification,
    ScoredCandidate,
};

pub const MAX_SUPPORTING: usize = 5;
pub const MAX_CONFIDENCE: f64 = 90.0;

// 沒有任何歷史資料時的固定估價
pub const NO_HISTORY_MIN: f64 = 500.0;
pub const NO_HISTORY_MAX: f64 = 2000.0;
pub const NO_HISTORY_AVERAGE: f64 = 1250.0;
pub const NO_HISTORY_CONFIDENCE: f64 = 20.0;

pub const FORMULA_COST_PER_SQ_FT: f64 = 15.0;
pub const FORMULA_CONFIDENCE: f64 = 30.0;

/// Produces a cost estimate for `spec` from the historical set.
///
/// Never fails: an empty history yields a fixed placeholder, and a history
/// with no positive-similarity match falls back to an area-based formula.
pub fn estimate(spec: &QuerySpecification, projects: &[HistoricalProject]) -> CostEstimate {
    if projects.is_empty() {
        tracing::debug!("No historical projects, using placeholder estimate");
        return no_history_estimate();
    }

    let candidates = select_candidates(spec, projects);
    if candidates.is_empty() {
        tracing::debug!(
            "None of {} historical projects resemble the specification, using formula estimate",
            projects.len()
        );
        return formula_estimate(spec);
    }

    tracing::debug!(
        "Weighting {} similar projects (best similarity {:.1})",
        candidates.len(),
        candidates[0].similarity
    );
    weighted_estimate(candidates)
}

pub fn no_history_estimate() -> CostEstimate {
    CostEstimate {
        min_cost: NO_HISTORY_MIN,
        max_cost: NO_HISTORY_MAX,
        average_cost: NO_HISTORY_AVERAGE,
        confidence: NO_HISTORY_CONFIDENCE,
        basis: EstimateBasis::NoHistory,
        similar_projects: Vec::new(),
    }
}

pub fn formula_estimate(spec: &QuerySpecification) -> CostEstimate {
    let base_cost = spec.area() * FORMULA_COST_PER_SQ_FT;

    let mut multiplier = 1.0;
    multiplier *= match spec.quality {
        QualityTier::Premium => 1.5,
        QualityTier::Standard => 1.2,
        QualityTier::Basic => 1.0,
    };
    multiplier *= match spec.complexity {
        ComplexityTier::High => 1.4,
        ComplexityTier::Medium => 1.2,
        ComplexityTier::Low => 1.0,
    };
    if spec.has_lighting {
        multiplier *= 1.3;
    }

    let estimated = base_cost * multiplier;

    CostEstimate {
        min_cost: estimated * 0.8,
        max_cost: estimated * 1.4,
        average_cost: estimated,
        confidence: FORMULA_CONFIDENCE,
        basis: EstimateBasis::Formula,
        similar_projects: Vec::new(),
    }
}

/// `candidates` must be non-empty and sorted by descending similarity.
fn weighted_estimate(mut candidates: Vec<ScoredCandidate>) -> CostEstimate {
    let mut weighted_cost = 0.0;
    let mut total_weight = 0.0;
    let mut min_cost = f64::INFINITY;
    let mut max_cost = f64::NEG_INFINITY;
    let mut similarity_sum = 0.0;

    for candidate in &candidates {
        let weight = candidate.similarity / 100.0;
        let cost = candidate.project.total_cost;
        weighted_cost += cost * weight;
        total_weight += weight;
        similarity_sum += candidate.similarity;
        min_cost = min_cost.min(cost);
        max_cost = max_cost.max(cost);
    }

    let average_cost = if total_weight > 0.0 {
        weighted_cost / total_weight
    } else {
        0.0
    };

    let count = candidates.len() as f64;
    let mean_similarity = similarity_sum / count;
    let confidence = (count * 10.0 + mean_similarity * 0.5).min(MAX_CONFIDENCE);

    candidates.truncate(MAX_SUPPORTING);

    CostEstimate {
        min_cost: min_cost * 0.9,
        max_cost: max_cost * 1.1,
        average_cost,
        confidence,
        basis: EstimateBasis::SimilarProjects,
        similar_projects: candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SignType;
    use chrono::{TimeZone, Utc};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn spec() -> QuerySpecification {
        QuerySpecification {
            sign_type: SignType::Pylon,
            height: 20.0,
            width: 8.0,
            material_type: "steel".to_string(),
            paint_colors: 2,
            has_lighting: true,
            quality: QualityTier::Premium,
            complexity: ComplexityTier::High,
            description: None,
        }
    }

    fn project(id: &str, total_cost: f64, width: f64) -> HistoricalProject {
        let created = Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap();
        HistoricalProject {
            id: id.to_string(),
            name: format!("Pylon {}", id),
            sign_type: SignType::Pylon,
            height: 20.0,
            width,
            material_type: "steel".to_string(),
            paint_colors: 2,
            has_lighting: true,
            quality: QualityTier::Premium,
            complexity: ComplexityTier::High,
            total_cost,
            material_cost: total_cost * 0.4,
            labor_cost: total_cost * 0.6,
            description: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn unrelated(id: &str) -> HistoricalProject {
        let mut p = project(id, 900.0, 0.0);
        p.sign_type = SignType::Wall;
        p.material_type = "vinyl".to_string();
        p.quality = QualityTier::Basic;
        p.complexity = ComplexityTier::Low;
        p
    }

    #[test]
    fn test_empty_history_placeholder() {
        let result = estimate(&spec(), &[]);
        assert_eq!(result.min_cost, 500.0);
        assert_eq!(result.max_cost, 2000.0);
        assert_eq!(result.average_cost, 1250.0);
        assert_eq!(result.confidence, 20.0);
        assert_eq!(result.basis, EstimateBasis::NoHistory);
        assert!(result.similar_projects.is_empty());
    }

    #[test]
    fn test_formula_multipliers() {
        let mut s = spec();
        s.height = 10.0;
        s.width = 5.0;
        s.quality = QualityTier::Standard;
        s.complexity = ComplexityTier::Medium;
        s.has_lighting = false;

        let result = estimate(&s, &[unrelated("x")]);

        // 50 sq ft * 15 * 1.2 * 1.2
        assert_eq!(result.basis, EstimateBasis::Formula);
        assert_close(result.average_cost, 1080.0);
        assert_close(result.min_cost, 864.0);
        assert_close(result.max_cost, 1512.0);
        assert_eq!(result.confidence, 30.0);
    }

    #[test]
    fn test_formula_basic_low_has_no_markup() {
        let mut s = spec();
        s.height = 2.0;
        s.width = 3.0;
        s.quality = QualityTier::Basic;
        s.complexity = ComplexityTier::Low;
        s.has_lighting = false;

        let result = formula_estimate(&s);

        assert_close(result.average_cost, 90.0);
    }

    #[test]
    fn test_weighted_average_uses_similarity() {
        // 100% match at 4000, 52.5% match at 10000
        let exact = project("exact", 4000.0, 8.0);
        let mut partial = project("partial", 10000.0, 16.0);
        partial.material_type = "aluminum".to_string();
        partial.quality = QualityTier::Standard;

        let result = estimate(&spec(), &[partial, exact]);

        // partial: 30 + 12.5 + 0 + 0 + 10 = 52.5
        let expected = (4000.0 * 1.0 + 10000.0 * 0.525) / (1.0 + 0.525);
        assert_eq!(result.basis, EstimateBasis::SimilarProjects);
        assert_close(result.average_cost, expected);
        assert_close(result.min_cost, 3600.0);
        assert_close(result.max_cost, 11000.0);
        assert_close(result.confidence, 20.0 + (100.0 + 52.5) / 2.0 * 0.5);
        assert_eq!(result.similar_projects[0].project.id, "exact");
    }

    #[test]
    fn test_confidence_capped_and_supporting_truncated() {
        let projects: Vec<HistoricalProject> = (0..12)
            .map(|i| project(&format!("p{}", i), 5000.0 + i as f64 * 100.0, 8.0))
            .collect();

        let result = estimate(&spec(), &projects);

        assert_eq!(result.confidence, 90.0);
        assert_eq!(result.similar_projects.len(), MAX_SUPPORTING);
        // 只有前 10 筆參與計算
        assert_close(result.max_cost, 5900.0 * 1.1);
    }

    #[test]
    fn test_single_candidate_range() {
        let single = project("only", 1000.0, 8.0);
        let result = estimate(&spec(), &[single]);

        assert_close(result.min_cost, 900.0);
        assert_close(result.max_cost, 1100.0);
        assert!(result.min_cost <= result.max_cost);
        assert_close(result.average_cost, 1000.0);
    }
}
