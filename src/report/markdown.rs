use super::aggregator::EvaluationReport;
use crate::engines::analysis::{BatchResult, SequenceReport};
use crate::engines::validation::RobustnessReport;
use crate::error::{FourTrackError, Result};
use std::fmt::Write;

fn percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn render_evaluation(report: &EvaluationReport) -> Result<String> {
    let mut out = String::new();
    write_evaluation(&mut out, report).map_err(|e| FourTrackError::Computation(e.to_string()))?;
    Ok(out)
}

pub fn render_sequence(report: &SequenceReport) -> Result<String> {
    let mut out = String::new();
    write_sequence(&mut out, report, "#").map_err(|e| FourTrackError::Computation(e.to_string()))?;
    Ok(out)
}

fn write_evaluation(out: &mut String, report: &EvaluationReport) -> std::fmt::Result {
    writeln!(out, "# {}", report.title)?;
    writeln!(out)?;
    writeln!(out, "Generated: {}", report.generated_at)?;
    writeln!(
        out,
        "Seed: {} | Null-model trials: {} | Significance threshold: {}",
        report.run.seed, report.run.trials, report.run.significance_threshold
    )?;
    writeln!(out)?;

    let p = &report.performance;
    writeln!(out, "## Performance")?;
    writeln!(out)?;
    writeln!(out, "| Component | Score |")?;
    writeln!(out, "|-----------|-------|")?;
    writeln!(out, "| Robustness | {} |", percent(p.robustness_score))?;
    writeln!(out, "| Statistical significance | {} |", percent(p.significance_score))?;
    writeln!(out, "| Constant correlation | {} |", percent(p.association_score))?;
    writeln!(out, "| **Overall** | **{:.1}% ({})** |", p.overall_score, p.grade)?;
    writeln!(out)?;

    if !report.findings.is_empty() {
        writeln!(out, "## Findings")?;
        writeln!(out)?;
        for finding in &report.findings {
            writeln!(out, "- {}", finding)?;
        }
        writeln!(out)?;
    }

    if let Some(robustness) = &report.robustness {
        write_robustness(out, robustness)?;
    }
    if let Some(batch) = &report.batch {
        write_batch(out, batch)?;
    }
    Ok(())
}

fn write_robustness(out: &mut String, report: &RobustnessReport) -> std::fmt::Result {
    writeln!(out, "## Robustness suite")?;
    writeln!(out)?;
    writeln!(out, "{}", report.summary)?;
    writeln!(out)?;
    writeln!(out, "| Case | Result | Notes |")?;
    writeln!(out, "|------|--------|-------|")?;
    for result in &report.test_results {
        let notes = result.error.as_deref().unwrap_or(&result.interpretation);
        writeln!(
            out,
            "| {} | {} | {} |",
            result.test_name,
            if result.passed { "pass" } else { "FAIL" },
            notes
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Average time per case: {:.3} ms", report.average_time_ms)?;
    writeln!(out)
}

fn write_batch(out: &mut String, batch: &BatchResult) -> std::fmt::Result {
    writeln!(out, "## Batch analysis")?;
    writeln!(out)?;
    writeln!(
        out,
        "{} sequences analysed, {} failed (seed {})",
        batch.reports.len(),
        batch.failed.len(),
        batch.seed
    )?;
    writeln!(out)?;

    if let Some(gc) = &batch.comparison.gc_content {
        writeln!(
            out,
            "GC content: min {:.2}%, max {:.2}%, mean {:.2}%",
            gc.min * 100.0,
            gc.max * 100.0,
            gc.mean * 100.0
        )?;
    }
    if let Some(score) = &batch.comparison.track_score {
        writeln!(
            out,
            "Average track score: min {:.3}, max {:.3}, mean {:.3}",
            score.min, score.max, score.mean
        )?;
    }
    if !batch.comparison.high_gc.is_empty() {
        writeln!(out, "High GC: {}", batch.comparison.high_gc.join(", "))?;
    }
    if !batch.comparison.low_gc.is_empty() {
        writeln!(out, "Low GC: {}", batch.comparison.low_gc.join(", "))?;
    }
    writeln!(out)?;

    for report in &batch.reports {
        write_sequence(out, report, "###")?;
    }

    if !batch.failed.is_empty() {
        writeln!(out, "### Failed sequences")?;
        writeln!(out)?;
        for failed in &batch.failed {
            writeln!(out, "- {}: {}", failed.name, failed.error)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_sequence(out: &mut String, report: &SequenceReport, heading: &str) -> std::fmt::Result {
    let meta = &report.metadata;
    writeln!(out, "{} {}", heading, meta.name)?;
    writeln!(out)?;
    writeln!(
        out,
        "- Alphabet: {}, length {} ({} encoded, {} codes{})",
        meta.alphabet,
        meta.length,
        meta.processed_length,
        meta.code_length,
        if meta.truncated { ", trailing base dropped" } else { "" }
    )?;
    if let Some(c) = &report.base_composition {
        writeln!(out, "- GC content: {:.2}% ({:?})", c.gc_percent(), c.band)?;
    }
    writeln!(out, "- Code preview: {:?}", report.code_preview)?;
    writeln!(out, "- Track 2 labels: {}", report.label_preview.join(" "))?;
    writeln!(out, "- Code entropy: {:.4} bits", report.code_distribution.entropy)?;

    let d = &report.descriptive;
    writeln!(
        out,
        "- Code mean {:.3}, std {:.3}, skewness {:.3}, kurtosis {:.3}",
        d.moments.mean, d.moments.std_dev, d.moments.skewness, d.moments.kurtosis
    )?;
    writeln!(
        out,
        "- Even/odd codes: {}/{}; lag-1 correlation {:.3}; runs {} (expected {:.1}, z {:.3})",
        d.parity.even,
        d.parity.odd,
        d.lag_correlation,
        d.runs.runs,
        d.runs.expected_runs,
        d.runs.z_score
    )?;
    if let Some(p) = &d.percentiles {
        writeln!(
            out,
            "- Percentiles p10/p25/p50/p75/p90: {}/{}/{}/{}/{}",
            p.p10, p.p25, p.p50, p.p75, p.p90
        )?;
    }

    let patterns = &report.patterns;
    let kinds: Vec<String> = patterns
        .by_kind
        .iter()
        .map(|(kind, count)| format!("{} {}", kind.as_str(), count))
        .collect();
    writeln!(
        out,
        "- Patterns: {} found ({}), density {:.3}, longest tandem repeat {}",
        patterns.total_patterns,
        if kinds.is_empty() { "none".to_string() } else { kinds.join(", ") },
        patterns.pattern_density,
        patterns.repetition_score
    )?;
    writeln!(out)?;

    writeln!(out, "| Track | Pairing | Symmetry | Yang | Entropy | Score | Rank |")?;
    writeln!(out, "|-------|---------|----------|------|---------|-------|------|")?;
    for t in &report.four_track.tracks {
        writeln!(
            out,
            "| {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {:?} |",
            t.track,
            t.score.pairing,
            t.symmetry.overall,
            t.forward.composition.yang_fraction,
            t.forward.entropy,
            t.score.score,
            t.score.rank
        )?;
    }
    writeln!(out)?;

    if !report.null_comparisons.is_empty() {
        writeln!(out, "| Track | Statistic | Observed | Null mean | z | p | Significant |")?;
        writeln!(out, "|-------|-----------|----------|-----------|---|---|-------------|")?;
        for c in &report.null_comparisons {
            writeln!(
                out,
                "| {} | {} | {:.4} | {:.4} | {:.3} | {:.4} | {} |",
                c.track,
                c.statistic.as_str(),
                c.observed,
                c.null_mean,
                c.z_score,
                c.p_value,
                if c.significant { "yes" } else { "no" }
            )?;
        }
        writeln!(out)?;
    }

    for a in &report.associations {
        writeln!(
            out,
            "- {}: score {:.3}, longest run {}, {} matching windows",
            a.constant,
            a.score,
            a.matched_length,
            a.matched_windows
        )?;
    }
    if !report.associations.is_empty() {
        writeln!(out)?;
    }

    for note in report
        .interpretation
        .gc_analysis
        .iter()
        .chain(&report.interpretation.hypotheses)
    {
        writeln!(out, "> {}", note)?;
    }
    writeln!(out)
}
