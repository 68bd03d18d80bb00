use chrono::{Duration, TimeZone, Utc};
use sign_estimator::core::selector::{select_candidates, MAX_CANDIDATES};
use sign_estimator::core::similarity::{area_similarity, score};
use sign_estimator::{
    estimate, ComplexityTier, EstimateBasis, HistoricalProject, QualityTier, QuerySpecification,
    SignType,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn storefront_spec() -> QuerySpecification {
    QuerySpecification {
        sign_type: SignType::ChannelLetters,
        height: 2.5,
        width: 12.0,
        material_type: "aluminum".to_string(),
        paint_colors: 1,
        has_lighting: false,
        quality: QualityTier::Standard,
        complexity: ComplexityTier::Medium,
        description: Some("Front fascia letters".to_string()),
    }
}

fn project(id: &str, sign_type: SignType, height: f64, width: f64, total_cost: f64) -> HistoricalProject {
    let created = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
    HistoricalProject {
        id: id.to_string(),
        name: format!("Job {}", id),
        sign_type,
        height,
        width,
        material_type: "aluminum".to_string(),
        paint_colors: 2,
        has_lighting: false,
        quality: QualityTier::Standard,
        complexity: ComplexityTier::Medium,
        total_cost,
        material_cost: total_cost * 0.45,
        labor_cost: total_cost * 0.55,
        description: None,
        created_at: created,
        updated_at: created,
    }
}

/// A varied history used by the property-style checks below.
fn mixed_history() -> Vec<HistoricalProject> {
    let sign_types = SignType::ALL;
    let qualities = QualityTier::ALL;
    let complexities = ComplexityTier::ALL;
    let materials = ["aluminum", "Acrylic", "steel", "", "ALUMINUM"];

    (0..40)
        .map(|i| {
            let mut p = project(
                &format!("m{}", i),
                sign_types[i % sign_types.len()],
                1.0 + (i % 7) as f64,
                2.0 + (i % 11) as f64 * 1.5,
                800.0 + i as f64 * 275.0,
            );
            p.quality = qualities[i % qualities.len()];
            p.complexity = complexities[(i / 2) % complexities.len()];
            p.material_type = materials[i % materials.len()].to_string();
            p.created_at = p.created_at - Duration::days(i as i64);
            p
        })
        .collect()
}

#[test]
fn test_empty_history_returns_placeholder_for_any_spec() {
    let mut specs = vec![storefront_spec()];
    let mut large = storefront_spec();
    large.sign_type = SignType::Pylon;
    large.height = 40.0;
    large.width = 10.0;
    large.has_lighting = true;
    specs.push(large);

    for spec in specs {
        let result = estimate(&spec, &[]);
        assert_eq!(result.min_cost, 500.0);
        assert_eq!(result.max_cost, 2000.0);
        assert_eq!(result.average_cost, 1250.0);
        assert_eq!(result.confidence, 20.0);
        assert_eq!(result.basis, EstimateBasis::NoHistory);
        assert!(result.similar_projects.is_empty());
    }
}

#[test]
fn test_identical_storefront_project() {
    let spec = storefront_spec();
    let history = vec![project("same", SignType::ChannelLetters, 2.5, 12.0, 4500.0)];

    let result = estimate(&spec, &history);

    assert_eq!(result.basis, EstimateBasis::SimilarProjects);
    assert_close(result.average_cost, 4500.0);
    assert_close(result.min_cost, 4050.0);
    assert_close(result.max_cost, 4950.0);
    assert_close(result.confidence, 60.0);
    assert_eq!(result.similar_projects.len(), 1);
    assert_eq!(result.similar_projects[0].similarity, 100.0);
}

#[test]
fn test_formula_fallback_scenario() {
    let spec = QuerySpecification {
        sign_type: SignType::Monument,
        height: 10.0,
        width: 5.0,
        material_type: "stone".to_string(),
        paint_colors: 1,
        has_lighting: true,
        quality: QualityTier::Premium,
        complexity: ComplexityTier::High,
        description: None,
    };

    // 面積為 0 且其餘屬性皆不同，相似度為 0
    let mut unrelated = project("flat", SignType::Wall, 3.0, 0.0, 700.0);
    unrelated.material_type = "vinyl".to_string();
    unrelated.quality = QualityTier::Basic;
    unrelated.complexity = ComplexityTier::Low;
    assert_eq!(score(&spec, &unrelated), 0.0);

    let result = estimate(&spec, &[unrelated]);

    assert_eq!(result.basis, EstimateBasis::Formula);
    assert_close(result.average_cost, 2047.5);
    assert_close(result.min_cost, 1638.0);
    assert_close(result.max_cost, 2866.5);
    assert_eq!(result.confidence, 30.0);
    assert!(result.similar_projects.is_empty());
}

#[test]
fn test_scores_stay_within_bounds() {
    let spec = storefront_spec();
    for p in mixed_history() {
        let value = score(&spec, &p);
        assert!((0.0..=100.0).contains(&value), "{} scored {}", p.id, value);
    }
}

#[test]
fn test_area_term_is_symmetric() {
    for (a, b) in [(30.0, 45.0), (1.0, 250.0), (12.5, 12.5), (0.0, 8.0)] {
        assert_eq!(area_similarity(a, b), area_similarity(b, a));
    }
}

#[test]
fn test_candidate_and_supporting_limits() {
    let spec = storefront_spec();
    let history = mixed_history();

    let selected = select_candidates(&spec, &history);
    assert!(selected.len() <= MAX_CANDIDATES);

    let result = estimate(&spec, &history);
    assert!(result.similar_projects.len() <= 5);
    for pair in result.similar_projects.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert_eq!(
        result.similar_projects[0].project.id,
        selected[0].project.id
    );
}

#[test]
fn test_confidence_and_range_properties() {
    let history = mixed_history();
    let sign_types = SignType::ALL;

    for (i, sign_type) in sign_types.iter().enumerate() {
        let mut spec = storefront_spec();
        spec.sign_type = *sign_type;
        spec.width = 3.0 + i as f64 * 4.0;

        for n in [1usize, 3, 12, 40] {
            let result = estimate(&spec, &history[..n]);
            assert!(result.min_cost <= result.max_cost);
            match result.basis {
                EstimateBasis::SimilarProjects => {
                    assert!((0.0..=90.0).contains(&result.confidence))
                }
                EstimateBasis::Formula => assert_eq!(result.confidence, 30.0),
                EstimateBasis::NoHistory => assert_eq!(result.confidence, 20.0),
            }
        }
    }
}

#[test]
fn test_estimate_does_not_mutate_inputs() {
    let spec = storefront_spec();
    let history = mixed_history();
    let spec_before = spec.clone();
    let history_before = history.clone();

    let _ = estimate(&spec, &history);

    assert_eq!(spec, spec_before);
    assert_eq!(history, history_before);
}

#[test]
fn test_estimates_from_multiple_threads() {
    let history = std::sync::Arc::new(mixed_history());
    let expected = estimate(&storefront_spec(), &history);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let history = std::sync::Arc::clone(&history);
            std::thread::spawn(move || estimate(&storefront_spec(), &history))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
