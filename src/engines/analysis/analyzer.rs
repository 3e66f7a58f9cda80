use crate::config::AppConfig;
use crate::data::{ConstantDigits, ConstantLibrary, RawSequence, SequenceValidator};
use crate::engines::association::{associate, AssociationResult};
use crate::engines::encoding::{PairCodec, Track};
use crate::engines::metrics::{
    BaseComposition, CodeDistribution, DescriptiveStats, FourTrackAnalysis, MetricsEngine,
    PatternSummary,
};
use crate::engines::null_model::{NullComparison, NullModelComparator};
use crate::error::Result;
use crate::types::{Alphabet, Statistic};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct SequenceMetadata {
    pub name: String,
    pub alphabet: Alphabet,
    /// Symbols after validation
    pub length: usize,
    /// Symbols that were encoded
    pub processed_length: usize,
    pub code_length: usize,
    pub truncated: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Interpretation {
    pub gc_analysis: Vec<String>,
    pub track_insights: BTreeMap<String, Vec<String>>,
    pub hypotheses: Vec<String>,
}

/// Everything known about one analysed sequence
#[derive(Debug, Clone, Serialize)]
pub struct SequenceReport {
    pub metadata: SequenceMetadata,
    pub base_composition: Option<BaseComposition>,
    pub code_distribution: CodeDistribution,
    pub descriptive: DescriptiveStats,
    pub patterns: PatternSummary,
    pub code_preview: Vec<u8>,
    /// Track 2 labels of the previewed codes
    pub label_preview: Vec<String>,
    pub four_track: FourTrackAnalysis,
    pub null_comparisons: Vec<NullComparison>,
    pub associations: Vec<AssociationResult>,
    pub interpretation: Interpretation,
}

impl SequenceReport {
    pub fn comparisons_for(&self, statistic: Statistic) -> impl Iterator<Item = &NullComparison> + '_ {
        self.null_comparisons
            .iter()
            .filter(move |c| c.statistic == statistic)
    }

    pub fn significant_count(&self) -> usize {
        self.null_comparisons.iter().filter(|c| c.significant).count()
    }

    pub fn gc_content(&self) -> Option<f64> {
        self.base_composition.as_ref().map(|c| c.gc_content)
    }
}

/// Runs one validated sequence through encoding, scoring, null model and association
pub struct SequenceAnalyzer {
    config: AppConfig,
    engine: MetricsEngine,
    comparator: NullModelComparator,
    constants: Vec<ConstantDigits>,
}

impl SequenceAnalyzer {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let constants = ConstantLibrary::resolve_all(&config.association)?;

        Ok(Self {
            config: config.clone(),
            engine: MetricsEngine::from_config(&config.analysis),
            comparator: NullModelComparator::new(
                config.null_model.clone(),
                MetricsEngine::from_config(&config.analysis),
            ),
            constants,
        })
    }

    pub fn analyze_raw<R: Rng + ?Sized>(&self, raw: &RawSequence, rng: &mut R) -> Result<SequenceReport> {
        self.analyze(&raw.name, &raw.content, raw.alphabet, rng)
    }

    pub fn analyze<R: Rng + ?Sized>(
        &self,
        name: &str,
        raw: &str,
        alphabet: Alphabet,
        rng: &mut R,
    ) -> Result<SequenceReport> {
        let sequence = SequenceValidator::validate(raw, alphabet)?;
        let encoded = PairCodec::encode(&sequence);
        log::info!(
            "Analyzing {} ({} {} symbols, {} codes)",
            name,
            sequence.len(),
            alphabet,
            encoded.len()
        );

        let base_composition = match alphabet {
            Alphabet::Dna => Some(BaseComposition::from_bases(
                &sequence.symbols()[..encoded.processed_len],
            )),
            Alphabet::Digits => None,
        };

        let four_track = self.engine.analyze(&encoded.codes);
        let null_comparisons = self.comparator.compare(&sequence, &four_track, rng)?;

        let associations = self
            .constants
            .iter()
            .map(|constant| associate(&encoded.codes, constant, self.config.association.window_size))
            .collect::<Result<Vec<_>>>()?;

        let code_preview = encoded.preview(self.config.analysis.preview_len);
        let label_preview = Track::Two
            .remap_codes(&code_preview)
            .iter()
            .map(|l| l.name.to_string())
            .collect();

        let interpretation = interpret(base_composition.as_ref(), &four_track, &null_comparisons);

        Ok(SequenceReport {
            metadata: SequenceMetadata {
                name: name.to_string(),
                alphabet,
                length: sequence.len(),
                processed_length: encoded.processed_len,
                code_length: encoded.len(),
                truncated: encoded.truncated,
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            base_composition,
            code_distribution: CodeDistribution::from_codes(&encoded.codes),
            descriptive: DescriptiveStats::from_codes(&encoded.codes),
            patterns: PatternSummary::detect(&encoded.codes),
            code_preview,
            label_preview,
            four_track,
            null_comparisons,
            associations,
            interpretation,
        })
    }
}

fn interpret(
    composition: Option<&BaseComposition>,
    analysis: &FourTrackAnalysis,
    comparisons: &[NullComparison],
) -> Interpretation {
    let mut notes = Interpretation::default();

    if let Some(c) = composition {
        notes
            .gc_analysis
            .push(format!("GC content {:.1}%: {}", c.gc_percent(), c.band.describe()));
    }

    for t in &analysis.tracks {
        let mut insights = Vec::new();
        let pairing = t.forward.pair_ratio();

        if t.track.uses_windows() {
            if pairing > 0.8 {
                insights.push("High window pairing, possibly periodic structure".to_string());
            } else if pairing < 0.2 {
                insights.push("Low window pairing, random-like region".to_string());
            }
            if t.forward.window_pairs.windows >= 3 {
                insights.push(format!("{} analysis windows", t.forward.window_pairs.windows));
            }
        } else {
            if pairing > 0.7 {
                insights.push("High global pairing".to_string());
            }
            let unpaired: usize = t.forward.global_pairs.unpaired.values().sum();
            if unpaired > 0 {
                insights.push(format!("{} unpaired codes", unpaired));
            }
        }

        if t.symmetry.overall > 0.8 {
            insights.push("High forward/reverse symmetry".to_string());
        } else if t.symmetry.overall < 0.3 {
            insights.push("Low forward/reverse symmetry".to_string());
        }

        if !insights.is_empty() {
            notes.track_insights.insert(t.track.to_string(), insights);
        }
    }

    notes.hypotheses.push(format!(
        "Best performing track: {}",
        analysis.summary.best_track
    ));
    if analysis.summary.average_symmetry > 0.75 {
        notes
            .hypotheses
            .push("Highly symmetric sequence, possibly palindromic".to_string());
    }

    let significant: Vec<String> = comparisons
        .iter()
        .filter(|c| c.significant)
        .map(|c| format!("{} {}", c.track, c.statistic.as_str()))
        .collect();
    if !significant.is_empty() {
        notes.hypotheses.push(format!(
            "Departs from the null model on: {}",
            significant.join(", ")
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn analyzer() -> SequenceAnalyzer {
        let mut config = AppConfig::default();
        config.null_model.trials = 50;
        SequenceAnalyzer::new(&config).unwrap()
    }

    #[test]
    fn test_dna_report() {
        let report = analyzer()
            .analyze("atcg", &"ATCG".repeat(11), Alphabet::Dna, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(report.metadata.code_length, 22);
        assert_eq!(&report.code_preview[..4], &[3, 5, 3, 5]);
        assert_eq!(report.code_preview.len(), 20);
        assert_eq!(&report.label_preview[..2], &["C".to_string(), "D".to_string()]);
        assert_eq!(report.gc_content(), Some(0.5));
        assert_eq!(report.null_comparisons.len(), 8);
        assert_eq!(report.associations.len(), 3);

        // 3,5 alternating: every code odd, every neighbour different
        assert_eq!(report.descriptive.parity.odd, 22);
        assert_eq!(report.descriptive.runs.runs, 22);
        assert!((report.descriptive.moments.mean - 4.0).abs() < 1e-12);
        assert_eq!(report.patterns.pair_score, 11);
        assert_eq!(report.patterns.repetition_score, 10);
    }

    #[test]
    fn test_digit_report_has_no_gc() {
        let report = analyzer()
            .analyze("pi", "3.14159265358979", Alphabet::Digits, &mut StdRng::seed_from_u64(2))
            .unwrap();
        assert!(report.base_composition.is_none());
        assert_eq!(report.metadata.code_length, 15);
        // the digits of pi match pi itself
        let pi = report.associations.iter().find(|a| a.constant == "pi").unwrap();
        assert_eq!(pi.score, 1.0);
    }

    #[test]
    fn test_invalid_symbol_aborts_sequence() {
        let err = analyzer()
            .analyze("bad", "ACGTN", Alphabet::Dna, &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_sequence_is_defined() {
        let report = analyzer()
            .analyze("empty", "", Alphabet::Dna, &mut StdRng::seed_from_u64(4))
            .unwrap();
        assert_eq!(report.metadata.code_length, 0);
        assert!(report.code_preview.is_empty());
        assert_eq!(report.descriptive.count, 0);
        assert!(report.descriptive.percentiles.is_none());
        assert_eq!(report.patterns.total_patterns, 0);
        assert!(report.associations.iter().all(|a| a.score == 0.0));
    }
}
