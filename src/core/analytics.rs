use crate::domain::model::{
    HistoricalProject, MonthlySummary, ProjectAnalytics, QualityCostSummary, QualityTier, SignType,
};
use std::collections::BTreeMap;

/// Aggregate figures over the historical set: totals, averages and the
/// per-sign-type, per-quality and per-month breakdowns.
pub fn summarize(projects: &[HistoricalProject]) -> ProjectAnalytics {
    let total_projects = projects.len();
    let total_revenue: f64 = projects.iter().map(|p| p.total_cost).sum();
    let total_area: f64 = projects.iter().map(|p| p.area()).sum();

    let (average_project_cost, average_area) = if total_projects > 0 {
        (
            total_revenue / total_projects as f64,
            total_area / total_projects as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let mut by_sign_type: BTreeMap<SignType, usize> = BTreeMap::new();
    let mut by_quality: BTreeMap<QualityTier, (f64, usize)> = BTreeMap::new();
    let mut by_month: BTreeMap<String, (usize, f64)> = BTreeMap::new();

    for project in projects {
        *by_sign_type.entry(project.sign_type).or_insert(0) += 1;

        let quality = by_quality.entry(project.quality).or_insert((0.0, 0));
        quality.0 += project.total_cost;
        quality.1 += 1;

        // YYYY-MM 字串排序即為時間順序
        let month = by_month
            .entry(project.created_at.format("%Y-%m").to_string())
            .or_insert((0, 0.0));
        month.0 += 1;
        month.1 += project.total_cost;
    }

    ProjectAnalytics {
        total_projects,
        total_revenue,
        average_project_cost,
        average_area,
        sign_type_distribution: by_sign_type.into_iter().collect(),
        cost_by_quality: by_quality
            .into_iter()
            .map(|(quality, (total, count))| QualityCostSummary {
                quality,
                average_cost: total / count as f64,
                total_projects: count,
            })
            .collect(),
        monthly: by_month
            .into_iter()
            .map(|(month, (projects, revenue))| MonthlySummary {
                month,
                projects,
                revenue,
            })
            .collect(),
    }
}
