// src/engines/metrics/engine.rs
use super::composition::PolarityComposition;
use super::entropy::label_entropy;
use super::pairing::{adjacent_pairs, global_pairing, window_pairing, GlobalPairing, PairCount, WindowPairing};
use crate::config::AnalysisConfig;
use crate::engines::encoding::Track;
use crate::types::Statistic;
use serde::Serialize;

/// Descriptive statistics of one code stream under one track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub track: Track,
    pub length: usize,
    pub composition: PolarityComposition,
    pub window_pairs: WindowPairing,
    pub global_pairs: GlobalPairing,
    pub adjacent_pairs: PairCount,
    pub entropy: f64,
}

impl AggregateResult {
    /// Structural score of the track: window ratio on track 1, global ratio otherwise
    pub fn pair_ratio(&self) -> f64 {
        if self.track.uses_windows() {
            self.window_pairs.ratio
        } else {
            self.global_pairs.ratio
        }
    }
}

/// Agreement between the forward and reversed readings of a stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Symmetry {
    pub pair_similarity: f64,
    pub global_similarity: f64,
    pub yang_similarity: f64,
    pub overall: f64,
}

impl Symmetry {
    pub fn between(forward: &AggregateResult, backward: &AggregateResult) -> Self {
        let pair_similarity = 1.0 - (forward.window_pairs.ratio - backward.window_pairs.ratio).abs();
        let global_similarity = 1.0 - (forward.global_pairs.ratio - backward.global_pairs.ratio).abs();
        let yang_similarity = 1.0
            - (forward.composition.yang_fraction - backward.composition.yang_fraction).abs();

        Self {
            pair_similarity,
            global_similarity,
            yang_similarity,
            overall: (pair_similarity + global_similarity + yang_similarity) / 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackRank {
    Excellent,
    Good,
    Fair,
}

impl TrackRank {
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            TrackRank::Excellent
        } else if score > 0.5 {
            TrackRank::Good
        } else {
            TrackRank::Fair
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackScore {
    pub score: f64,
    pub symmetry: f64,
    pub pairing: f64,
    pub yang_balance: f64,
    pub rank: TrackRank,
}

impl TrackScore {
    fn new(forward: &AggregateResult, symmetry: &Symmetry) -> Self {
        let pairing = forward.pair_ratio();
        let yang_balance = 1.0 - (forward.composition.yang_fraction - 0.5).abs() * 2.0;
        let score = pairing * 0.4 + symmetry.overall * 0.4 + yang_balance * 0.2;

        Self {
            score,
            symmetry: symmetry.overall,
            pairing,
            yang_balance,
            rank: TrackRank::from_score(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackAnalysis {
    pub track: Track,
    pub forward: AggregateResult,
    pub backward: AggregateResult,
    pub symmetry: Symmetry,
    pub score: TrackScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourTrackSummary {
    pub best_track: Track,
    pub worst_track: Track,
    pub average_symmetry: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourTrackAnalysis {
    pub tracks: Vec<TrackAnalysis>,
    pub summary: FourTrackSummary,
}

impl FourTrackAnalysis {
    pub fn track(&self, track: Track) -> Option<&TrackAnalysis> {
        self.tracks.iter().find(|t| t.track == track)
    }

    /// Value of a null-model statistic for one track (0 if the track is missing)
    pub fn statistic(&self, track: Track, statistic: Statistic) -> f64 {
        self.track(track)
            .map(|t| match statistic {
                Statistic::PairRatio => t.forward.pair_ratio(),
                Statistic::Symmetry => t.symmetry.overall,
            })
            .unwrap_or(0.0)
    }
}

pub struct MetricsEngine {
    window_size: usize,
    window_step: usize,
}

impl MetricsEngine {
    pub fn new(window_size: usize, window_step: usize) -> Self {
        Self {
            window_size,
            window_step,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.window_size, config.window_step)
    }

    /// Score a code stream under one track
    pub fn score(&self, codes: &[u8], track: Track) -> AggregateResult {
        let labels = track.remap_codes(codes);

        let window_pairs = if track.uses_windows() {
            window_pairing(codes, self.window_size, self.window_step)
        } else {
            WindowPairing::default()
        };

        AggregateResult {
            track,
            length: codes.len(),
            composition: PolarityComposition::from_labels(&labels),
            window_pairs,
            global_pairs: global_pairing(codes, track),
            adjacent_pairs: adjacent_pairs(codes, track),
            entropy: label_entropy(&labels),
        }
    }

    pub fn analyze_track(&self, codes: &[u8], track: Track) -> TrackAnalysis {
        let reversed: Vec<u8> = codes.iter().rev().copied().collect();
        let forward = self.score(codes, track);
        let backward = self.score(&reversed, track);
        let symmetry = Symmetry::between(&forward, &backward);
        let score = TrackScore::new(&forward, &symmetry);

        TrackAnalysis {
            track,
            forward,
            backward,
            symmetry,
            score,
        }
    }

    /// Forward and reversed scoring on all four tracks
    pub fn analyze(&self, codes: &[u8]) -> FourTrackAnalysis {
        let tracks: Vec<TrackAnalysis> = Track::all()
            .into_iter()
            .map(|track| self.analyze_track(codes, track))
            .collect();

        let summary = Self::summarize(&tracks);
        FourTrackAnalysis { tracks, summary }
    }

    fn summarize(tracks: &[TrackAnalysis]) -> FourTrackSummary {
        let mut ranked: Vec<(Track, f64)> = tracks.iter().map(|t| (t.track, t.score.score)).collect();
        // Stable sort keeps track order among equal scores
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let n = tracks.len().max(1) as f64;
        FourTrackSummary {
            best_track: ranked.first().map(|r| r.0).unwrap_or(Track::One),
            worst_track: ranked.last().map(|r| r.0).unwrap_or(Track::One),
            average_symmetry: tracks.iter().map(|t| t.symmetry.overall).sum::<f64>() / n,
            average_score: tracks.iter().map(|t| t.score.score).sum::<f64>() / n,
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stream_is_defined() {
        let engine = MetricsEngine::default();
        let analysis = engine.analyze(&[]);
        assert_eq!(analysis.tracks.len(), 4);
        for t in &analysis.tracks {
            assert_eq!(t.forward.length, 0);
            assert_eq!(t.forward.entropy, 0.0);
            assert_eq!(t.forward.pair_ratio(), 0.0);
            assert_eq!(t.symmetry.overall, 1.0);
            // 0.4 * 0 + 0.4 * 1 + 0.2 * 0
            assert!((t.score.score - 0.4).abs() < 1e-12);
        }
        assert_eq!(analysis.summary.best_track, Track::One);
    }

    #[test]
    fn test_palindrome_is_symmetric() {
        let engine = MetricsEngine::default();
        let codes = [1, 2, 3, 4, 5, 5, 4, 3, 2, 1];
        for t in engine.analyze(&codes).tracks {
            assert_eq!(t.symmetry.overall, 1.0);
        }
    }

    #[test]
    fn test_track_two_on_periodic_codes() {
        let engine = MetricsEngine::default();
        let codes: Vec<u8> = [3, 5].repeat(11);
        let result = engine.score(&codes, Track::Two);
        assert_eq!(result.composition.yang, 11);
        assert_eq!(result.composition.yin, 11);
        assert_eq!(result.composition.yang_fraction, 0.5);
        assert!((result.entropy - 1.0).abs() < 1e-12);
        assert_eq!(result.adjacent_pairs.valid, 0);
    }

    #[test]
    fn test_perfect_pairing_scores_excellent() {
        let engine = MetricsEngine::default();
        let codes = [1, 8, 8, 1];
        let analysis = engine.analyze_track(&codes, Track::Two);
        assert_eq!(analysis.forward.pair_ratio(), 1.0);
        assert_eq!(analysis.score.rank, TrackRank::Excellent);
    }

    #[test]
    fn test_statistic_lookup() {
        let engine = MetricsEngine::default();
        let analysis = engine.analyze(&[0, 9, 0, 9]);
        assert_eq!(analysis.statistic(Track::Two, Statistic::PairRatio), 1.0);
        assert_eq!(analysis.statistic(Track::Two, Statistic::Symmetry), 1.0);
    }
}
