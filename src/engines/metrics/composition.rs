// src/engines/metrics/composition.rs
use super::entropy::shannon_entropy;
use crate::types::{Label, Polarity};
use serde::Serialize;

/// Yang/yin balance of a label stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityComposition {
    pub yang: usize,
    pub yin: usize,
    /// yang / yin, 0 when there is no yin label
    pub ratio: f64,
    pub yang_fraction: f64,
}

impl PolarityComposition {
    pub fn from_labels(labels: &[Label]) -> Self {
        let yang = labels.iter().filter(|l| l.polarity == Polarity::Yang).count();
        let yin = labels.len() - yang;

        Self {
            yang,
            yin,
            ratio: if yin > 0 { yang as f64 / yin as f64 } else { 0.0 },
            yang_fraction: if labels.is_empty() {
                0.0
            } else {
                yang as f64 / labels.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GcBand {
    High,
    Moderate,
    Low,
}

impl GcBand {
    pub fn from_content(gc_content: f64) -> Self {
        if gc_content > 0.6 {
            GcBand::High
        } else if gc_content < 0.4 {
            GcBand::Low
        } else {
            GcBand::Moderate
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            GcBand::High => "high GC content, stable structure",
            GcBand::Moderate => "moderate GC content",
            GcBand::Low => "low GC content, AT rich",
        }
    }
}

/// Base counts over the bases that were actually encoded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseComposition {
    pub length: usize,
    pub gc_count: usize,
    pub at_count: usize,
    pub gc_content: f64,
    /// gc / at, 0 when there is no A or T
    pub gc_at_ratio: f64,
    pub band: GcBand,
}

impl BaseComposition {
    pub fn from_bases(bases: &[u8]) -> Self {
        let gc_count = bases.iter().filter(|&&b| b == b'G' || b == b'C').count();
        let at_count = bases.len() - gc_count;
        let gc_content = if bases.is_empty() {
            0.0
        } else {
            gc_count as f64 / bases.len() as f64
        };

        Self {
            length: bases.len(),
            gc_count,
            at_count,
            gc_content,
            gc_at_ratio: if at_count > 0 {
                gc_count as f64 / at_count as f64
            } else {
                0.0
            },
            band: GcBand::from_content(gc_content),
        }
    }

    pub fn gc_percent(&self) -> f64 {
        self.gc_content * 100.0
    }
}

/// Counts of each code 0-9 with the entropy of that distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeDistribution {
    pub counts: [usize; 10],
    pub entropy: f64,
}

impl CodeDistribution {
    pub fn from_codes(codes: &[u8]) -> Self {
        let mut counts = [0usize; 10];
        for &c in codes {
            if let Some(slot) = counts.get_mut(c as usize) {
                *slot += 1;
            }
        }
        Self {
            counts,
            entropy: shannon_entropy(counts.iter().copied()),
        }
    }

    pub fn proportions(&self) -> [f64; 10] {
        let total: usize = self.counts.iter().sum();
        let mut p = [0.0; 10];
        if total > 0 {
            for (slot, &count) in p.iter_mut().zip(&self.counts) {
                *slot = count as f64 / total as f64;
            }
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gc_content_full() {
        let bases = "GC".repeat(21);
        let comp = BaseComposition::from_bases(bases.as_bytes());
        assert_eq!(comp.gc_content, 1.0);
        assert_eq!(format!("{:.2}", comp.gc_percent()), "100.00");
        assert_eq!(comp.band, GcBand::High);
        assert_eq!(comp.gc_at_ratio, 0.0);
    }

    #[test]
    fn test_gc_bands() {
        assert_eq!(GcBand::from_content(0.5), GcBand::Moderate);
        assert_eq!(GcBand::from_content(0.6), GcBand::Moderate);
        assert_eq!(GcBand::from_content(0.39), GcBand::Low);
    }

    #[test]
    fn test_empty_composition() {
        let comp = BaseComposition::from_bases(&[]);
        assert_eq!(comp.gc_content, 0.0);
        let polarity = PolarityComposition::from_labels(&[]);
        assert_eq!(polarity.yang_fraction, 0.0);
        assert_eq!(polarity.ratio, 0.0);
    }

    #[test]
    fn test_polarity_ratio() {
        let labels = [Label::yang("A"), Label::yang("C"), Label::yin("B")];
        let comp = PolarityComposition::from_labels(&labels);
        assert_eq!(comp.yang, 2);
        assert_eq!(comp.yin, 1);
        assert_eq!(comp.ratio, 2.0);
    }

    #[test]
    fn test_code_distribution() {
        let dist = CodeDistribution::from_codes(&[3, 5, 3, 5]);
        assert_eq!(dist.counts[3], 2);
        assert!((dist.entropy - 1.0).abs() < 1e-12);
        assert_eq!(dist.proportions()[5], 0.5);
    }
}
