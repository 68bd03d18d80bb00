use crate::core::similarity;
use crate::domain::model::{HistoricalProject, QuerySpecification, ScoredCandidate};

pub const MAX_CANDIDATES: usize = 10;

/// Scores every project, drops non-positive scores and keeps the best
/// `MAX_CANDIDATES`, highest similarity first.
///
/// Equal scores are ordered most recent `created_at` first; records that are
/// still tied keep their input order.
pub fn select_candidates(
    spec: &QuerySpecification,
    projects: &[HistoricalProject],
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<(&HistoricalProject, f64)> = projects
        .iter()
        .map(|project| (project, similarity::score(spec, project)))
        .filter(|(_, score)| *score > 0.0)
        .collect();

    // sort_by 為穩定排序
    scored.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .total_cmp(a_score)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    scored
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(|(project, similarity)| ScoredCandidate {
            project: project.clone(),
            similarity,
        })
        .collect()
}
