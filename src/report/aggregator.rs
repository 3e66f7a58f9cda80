use crate::config::ReportConfig;
use crate::engines::analysis::{BatchResult, SequenceReport};
use crate::engines::validation::RobustnessReport;
use crate::types::Statistic;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Letter for a score on the 0-100 scale
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

/// Component scores on a 0-100 scale; `None` when a component had no inputs
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub robustness_score: Option<f64>,
    pub significance_score: Option<f64>,
    pub association_score: Option<f64>,
    pub overall_score: f64,
    pub grade: Grade,
}

/// Settings of the run that produced a report
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    pub seed: u64,
    pub trials: usize,
    pub significance_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub title: String,
    pub generated_at: String,
    pub run: RunMetadata,
    pub robustness: Option<RobustnessReport>,
    pub batch: Option<BatchResult>,
    pub performance: PerformanceSummary,
    pub findings: Vec<String>,
}

pub struct ReportAggregator {
    config: ReportConfig,
}

impl ReportAggregator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn aggregate(
        &self,
        robustness: Option<RobustnessReport>,
        batch: Option<BatchResult>,
        run: RunMetadata,
    ) -> EvaluationReport {
        let reports: &[SequenceReport] = batch.as_ref().map(|b| b.reports.as_slice()).unwrap_or(&[]);
        let performance = self.performance(robustness.as_ref(), reports);
        let findings = findings(robustness.as_ref(), batch.as_ref(), &run);

        EvaluationReport {
            title: "Four-track sequence evaluation".to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            run,
            robustness,
            batch,
            performance,
            findings,
        }
    }

    pub fn performance(
        &self,
        robustness: Option<&RobustnessReport>,
        reports: &[SequenceReport],
    ) -> PerformanceSummary {
        let robustness_score = robustness
            .filter(|r| r.total > 0)
            .map(|r| r.passed as f64 / r.total as f64 * 100.0);

        let pair_ratio: Vec<bool> = reports
            .iter()
            .flat_map(|r| r.comparisons_for(Statistic::PairRatio))
            .map(|c| c.significant)
            .collect();
        let significance_score = if pair_ratio.is_empty() {
            None
        } else {
            let hits = pair_ratio.iter().filter(|s| **s).count();
            Some(hits as f64 / pair_ratio.len() as f64 * 100.0)
        };

        let scores: Vec<f64> = reports
            .iter()
            .flat_map(|r| r.associations.iter().map(|a| a.score))
            .collect();
        let association_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64 * 100.0)
        };

        let weighted = [
            (robustness_score, self.config.robustness_weight),
            (significance_score, self.config.significance_weight),
            (association_score, self.config.association_weight),
        ];
        let (sum, weight) = weighted
            .iter()
            .filter_map(|(score, w)| score.map(|s| (s * w, *w)))
            .fold((0.0, 0.0), |(sum, total), (s, w)| (sum + s, total + w));
        let overall_score = if weight > 0.0 { sum / weight } else { 0.0 };

        PerformanceSummary {
            robustness_score,
            significance_score,
            association_score,
            overall_score,
            grade: Grade::from_score(overall_score),
        }
    }
}

fn findings(
    robustness: Option<&RobustnessReport>,
    batch: Option<&BatchResult>,
    run: &RunMetadata,
) -> Vec<String> {
    let mut findings = Vec::new();

    if let Some(r) = robustness {
        if r.passed_all {
            findings.push(format!("All {} robustness tests passed", r.total));
        } else {
            findings.push(format!(
                "Robustness pass rate {:.1}% ({} of {} failed)",
                r.pass_rate * 100.0,
                r.failed,
                r.total
            ));
        }
    }

    if let Some(b) = batch {
        let comparisons: Vec<_> = b
            .reports
            .iter()
            .flat_map(|r| r.comparisons_for(Statistic::PairRatio))
            .collect();
        let significant = comparisons.iter().filter(|c| c.significant).count();
        findings.push(format!(
            "{} of {} pair-ratio comparisons significant at p < {}",
            significant,
            comparisons.len(),
            run.significance_threshold
        ));

        let mut by_constant: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for report in &b.reports {
            for a in &report.associations {
                by_constant.entry(a.constant.as_str()).or_default().push(a.score);
            }
        }
        for (name, scores) in by_constant {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            if mean > 0.5 {
                findings.push(format!("Strong association with {} (mean score {:.3})", name, mean));
            }
        }

        if !b.failed.is_empty() {
            findings.push(format!("{} sequences failed validation", b.failed.len()));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades() {
        assert_eq!(Grade::from_score(95.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(85.0), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
    }

    #[test]
    fn test_no_components() {
        let aggregator = ReportAggregator::new(ReportConfig::default());
        let summary = aggregator.performance(None, &[]);
        assert_eq!(summary.overall_score, 0.0);
        assert_eq!(summary.grade, Grade::F);
        assert!(summary.robustness_score.is_none());
    }
}
