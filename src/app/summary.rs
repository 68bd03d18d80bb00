use crate::domain::model::{EstimateBasis, EstimateReport};

const SUMMARY_PROJECTS: usize = 3;

/// Plain-text summary printed after a successful run.
pub fn render_summary(report: &EstimateReport) -> String {
    let estimate = &report.estimate;
    let mut lines = Vec::new();

    lines.push(format!(
        "Estimated cost: {:.2} (range {:.2} - {:.2})",
        estimate.average_cost, estimate.min_cost, estimate.max_cost
    ));
    lines.push(format!(
        "Confidence: {:.0}% ({})",
        estimate.confidence,
        estimate.confidence_level()
    ));

    let basis = match estimate.basis {
        EstimateBasis::NoHistory => "no historical projects available, placeholder range".to_string(),
        EstimateBasis::Formula => format!(
            "no similar projects among {} historical records, area-based formula",
            report.historical_count
        ),
        EstimateBasis::SimilarProjects => format!(
            "{} similar projects shown from {} historical records",
            estimate.similar_projects.len(),
            report.historical_count
        ),
    };
    lines.push(format!("Basis: {}", basis));

    if !estimate.similar_projects.is_empty() {
        lines.push("Similar projects:".to_string());
        for candidate in estimate.similar_projects.iter().take(SUMMARY_PROJECTS) {
            let project = &candidate.project;
            lines.push(format!(
                "  - {} ({:.0}% match): {:.2} | {} | {}' x {}' | {}",
                project.name,
                candidate.similarity,
                project.total_cost,
                project.sign_type.label(),
                project.height,
                project.width,
                project.material_type
            ));
        }
    }

    if let Some(analytics) = &report.analytics {
        lines.push(format!(
            "History: {} projects, revenue {:.2}, average cost {:.2}, average area {:.0} sq ft",
            analytics.total_projects,
            analytics.total_revenue,
            analytics.average_project_cost,
            analytics.average_area
        ));
    }

    lines.join("\n")
}
