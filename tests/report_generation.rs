use fourtrack::config::AppConfig;
use fourtrack::data::{SequenceKind, TextConnector};
use fourtrack::engines::analysis::{BatchAnalyzer, BatchResult, SequenceAnalyzer};
use fourtrack::engines::metrics::MetricsEngine;
use fourtrack::engines::validation::ValidationOrchestrator;
use fourtrack::report::{self, Grade, ReportAggregator, RunMetadata};
use std::fs;

fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.null_model.trials = 50;
    config
}

fn run_meta(config: &AppConfig, seed: u64) -> RunMetadata {
    RunMetadata {
        seed,
        trials: config.null_model.trials,
        significance_threshold: config.null_model.significance_threshold,
    }
}

fn batch_from_dir(config: &AppConfig, kind: SequenceKind) -> BatchResult {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("alpha.txt"), "ATGCGCGTATTAGCCGATCGGATCCGATGCAAGT\n").unwrap();
    fs::write(dir.path().join("beta.dat"), "GGCCGGCCAATTGGCCGGCCTTAAGGCC").unwrap();
    fs::write(dir.path().join("broken.txt"), "ACGTNACGT").unwrap();
    fs::write(dir.path().join("notes.md"), "ignored").unwrap();

    let sequences = TextConnector::load_dir(dir.path(), kind, &config.analysis).unwrap();
    assert_eq!(sequences.len(), 3);

    let analyzer = SequenceAnalyzer::new(config).unwrap();
    BatchAnalyzer::new(&analyzer).run(sequences, 42).unwrap()
}

#[test]
fn test_robustness_only_report_grades_a() {
    let config = small_config();
    let suite = ValidationOrchestrator::new(MetricsEngine::from_config(&config.analysis))
        .run_robustness_report("edge-inputs".to_string());

    let evaluation = ReportAggregator::new(config.report.clone()).aggregate(Some(suite), None, run_meta(&config, 7));

    assert_eq!(evaluation.performance.robustness_score, Some(90.0));
    assert!(evaluation.performance.significance_score.is_none());
    assert!(evaluation.performance.association_score.is_none());
    assert!((evaluation.performance.overall_score - 90.0).abs() < 1e-9);
    assert_eq!(evaluation.performance.grade, Grade::A);
    assert!(evaluation.findings[0].contains("90.0%"));
}

#[test]
fn test_batch_records_failures() {
    let config = small_config();
    let batch = batch_from_dir(&config, SequenceKind::Dna);

    assert_eq!(batch.total(), 3);
    let names: Vec<_> = batch.reports.iter().map(|r| r.metadata.name.as_str()).collect();
    assert_eq!(names, vec!["alpha.txt", "beta.dat"]);
    assert_eq!(batch.failed.len(), 1);
    assert_eq!(batch.failed[0].name, "broken.txt");
    assert!(batch.failed[0].error.contains('N'));

    let gc = batch.comparison.gc_content.as_ref().unwrap();
    assert!(gc.min <= gc.mean && gc.mean <= gc.max);
}

#[test]
fn test_auto_detection_cites_bad_base() {
    let config = small_config();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("acgtx.txt"), "ACGTX").unwrap();
    fs::write(dir.path().join("broken.txt"), "ACGTNACGT").unwrap();
    fs::write(dir.path().join("pi.txt"), "3.14159265358979323846").unwrap();

    let sequences = TextConnector::load_dir(dir.path(), SequenceKind::Auto, &config.analysis).unwrap();
    let analyzer = SequenceAnalyzer::new(&config).unwrap();
    let batch = BatchAnalyzer::new(&analyzer).run(sequences, 11).unwrap();

    assert_eq!(batch.reports.len(), 1);
    assert_eq!(batch.reports[0].metadata.name, "pi.txt");
    assert!(batch.reports[0].base_composition.is_none());

    assert_eq!(batch.failed.len(), 2);
    assert_eq!(batch.failed[0].name, "acgtx.txt");
    assert_eq!(
        batch.failed[0].error,
        "Invalid symbol 'X' at position 4 (allowed: A, C, G, T)"
    );
    assert_eq!(batch.failed[1].name, "broken.txt");
    assert!(batch.failed[1].error.contains("'N' at position 4"));
}

#[test]
fn test_batch_is_reproducible() {
    let config = small_config();
    let first = batch_from_dir(&config, SequenceKind::Dna);
    let second = batch_from_dir(&config, SequenceKind::Dna);

    let p = |b: &BatchResult| -> Vec<f64> {
        b.reports
            .iter()
            .flat_map(|r| r.null_comparisons.iter().map(|c| c.p_value))
            .collect()
    };
    assert_eq!(p(&first), p(&second));
}

#[test]
fn test_full_report_renders() {
    let config = small_config();
    let suite = ValidationOrchestrator::new(MetricsEngine::from_config(&config.analysis))
        .run_robustness_report("edge-inputs".to_string());
    let batch = batch_from_dir(&config, SequenceKind::Dna);

    let evaluation = ReportAggregator::new(config.report.clone()).aggregate(
        Some(suite),
        Some(batch),
        run_meta(&config, 42),
    );
    assert!(evaluation.performance.significance_score.is_some());
    assert!(evaluation.performance.association_score.is_some());

    let markdown = report::render_evaluation(&evaluation).unwrap();
    assert!(markdown.starts_with("# Four-track sequence evaluation"));
    assert!(markdown.contains("Seed: 42"));
    assert!(markdown.contains("### alpha.txt"));
    assert!(markdown.contains("- broken.txt:"));

    // every p-value cell carries four decimals
    let p_cells: Vec<&str> = markdown
        .lines()
        .filter(|l| l.contains("| pair_ratio |") || l.contains("| symmetry |"))
        .filter_map(|l| l.split('|').nth(6))
        .collect();
    assert!(!p_cells.is_empty());
    for cell in p_cells {
        let digits = cell.trim().split('.').nth(1).unwrap();
        assert_eq!(digits.len(), 4);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    report::write_json(&evaluation, &path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["run"]["seed"], 42);
    assert_eq!(json["batch"]["failed"][0]["name"], "broken.txt");
    assert_eq!(json["robustness"]["total"], 10);
}
