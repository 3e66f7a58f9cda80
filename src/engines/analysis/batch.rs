use super::analyzer::{SequenceAnalyzer, SequenceReport};
use crate::data::RawSequence;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

/// A sequence that could not be analysed, with the error message verbatim
#[derive(Debug, Clone, Serialize)]
pub struct FailedSequence {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RangeStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: values.iter().sum::<f64>() / values.len() as f64,
        })
    }
}

/// Cross-sequence view of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchComparison {
    pub sequences: usize,
    pub gc_content: Option<RangeStats>,
    pub track_score: Option<RangeStats>,
    pub high_gc: Vec<String>,
    pub low_gc: Vec<String>,
}

impl BatchComparison {
    pub fn from_reports(reports: &[SequenceReport]) -> Self {
        let gc: Vec<f64> = reports.iter().filter_map(|r| r.gc_content()).collect();
        let scores: Vec<f64> = reports
            .iter()
            .map(|r| r.four_track.summary.average_score)
            .collect();

        let names_where = |pred: fn(f64) -> bool| -> Vec<String> {
            reports
                .iter()
                .filter(|r| r.gc_content().map(pred).unwrap_or(false))
                .map(|r| r.metadata.name.clone())
                .collect()
        };

        Self {
            sequences: reports.len(),
            gc_content: RangeStats::from_values(&gc),
            track_score: RangeStats::from_values(&scores),
            high_gc: names_where(|gc| gc > 0.6),
            low_gc: names_where(|gc| gc < 0.4),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub seed: u64,
    pub reports: Vec<SequenceReport>,
    pub failed: Vec<FailedSequence>,
    pub comparison: BatchComparison,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.reports.len() + self.failed.len()
    }
}

pub struct BatchAnalyzer<'a> {
    analyzer: &'a SequenceAnalyzer,
}

impl<'a> BatchAnalyzer<'a> {
    pub fn new(analyzer: &'a SequenceAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Analyse every sequence in parallel. Item `i` (after sorting by name) draws its
    /// null sequences from a generator seeded with `seed + i`, so the outcome does not
    /// depend on scheduling. Validation errors are recorded per sequence; anything else
    /// aborts the batch.
    pub fn run(&self, mut sequences: Vec<RawSequence>, seed: u64) -> Result<BatchResult> {
        sequences.sort_by(|a, b| a.name.cmp(&b.name));
        log::info!("Batch analysis of {} sequences (seed {})", sequences.len(), seed);

        let outcomes: Vec<(String, Result<SequenceReport>)> = sequences
            .par_iter()
            .enumerate()
            .map(|(index, raw)| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
                (raw.name.clone(), self.analyzer.analyze_raw(raw, &mut rng))
            })
            .collect();

        let mut reports = Vec::new();
        let mut failed = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) if e.is_validation() => {
                    log::warn!("Skipping {}: {}", name, e);
                    failed.push(FailedSequence {
                        name,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        reports.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
        failed.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(BatchResult {
            seed,
            comparison: BatchComparison::from_reports(&reports),
            reports,
            failed,
        })
    }
}
