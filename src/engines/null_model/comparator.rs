use super::distribution::NullDistribution;
use crate::config::{NullModelConfig, Resampling};
use crate::engines::encoding::{PairCodec, Track};
use crate::engines::metrics::{FourTrackAnalysis, MetricsEngine};
use crate::error::{FourTrackError, Result};
use crate::types::{Alphabet, Sequence, Statistic};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Outcome of judging one (track, statistic) against the null model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullComparison {
    pub track: Track,
    pub statistic: Statistic,
    pub observed: f64,
    pub null_mean: f64,
    pub null_std: f64,
    pub z_score: f64,
    pub p_value: f64,
    pub significant: bool,
    pub trials: usize,
}

pub struct NullModelComparator {
    config: NullModelConfig,
    engine: MetricsEngine,
}

impl NullModelComparator {
    pub fn new(config: NullModelConfig, engine: MetricsEngine) -> Self {
        Self { config, engine }
    }

    /// Run the configured number of reference sequences once and judge every
    /// configured statistic on every track against them.
    pub fn compare<R: Rng + ?Sized>(
        &self,
        sequence: &Sequence,
        observed: &FourTrackAnalysis,
        rng: &mut R,
    ) -> Result<Vec<NullComparison>> {
        self.check_trials()?;

        let nulls: Vec<FourTrackAnalysis> = (0..self.config.trials)
            .map(|_| {
                let codes = self.null_codes(sequence, rng);
                self.engine.analyze(&codes)
            })
            .collect();

        let mut comparisons = Vec::new();
        for track in Track::all() {
            for &statistic in &self.config.statistics {
                let samples = nulls.iter().map(|n| n.statistic(track, statistic)).collect();
                let distribution = NullDistribution::from_samples(samples)?;
                comparisons.push(self.judge(
                    track,
                    statistic,
                    observed.statistic(track, statistic),
                    &distribution,
                )?);
            }
        }

        Ok(comparisons)
    }

    /// Judge a single track and statistic
    pub fn compare_track<R: Rng + ?Sized>(
        &self,
        sequence: &Sequence,
        track: Track,
        statistic: Statistic,
        rng: &mut R,
    ) -> Result<NullComparison> {
        self.check_trials()?;

        let observed_codes = PairCodec::encode(sequence).codes;
        let observed = self.statistic_of(&observed_codes, track, statistic);

        let samples = (0..self.config.trials)
            .map(|_| {
                let codes = self.null_codes(sequence, rng);
                self.statistic_of(&codes, track, statistic)
            })
            .collect();

        let distribution = NullDistribution::from_samples(samples)?;
        self.judge(track, statistic, observed, &distribution)
    }

    fn statistic_of(&self, codes: &[u8], track: Track, statistic: Statistic) -> f64 {
        let analysis = self.engine.analyze_track(codes, track);
        match statistic {
            Statistic::PairRatio => analysis.forward.pair_ratio(),
            Statistic::Symmetry => analysis.symmetry.overall,
        }
    }

    fn judge(
        &self,
        track: Track,
        statistic: Statistic,
        observed: f64,
        distribution: &NullDistribution,
    ) -> Result<NullComparison> {
        let outcome = distribution.compare(
            observed,
            self.config.p_value_method,
            self.config.significance_threshold,
        )?;

        Ok(NullComparison {
            track,
            statistic,
            observed,
            null_mean: distribution.mean(),
            null_std: distribution.std_dev(),
            z_score: outcome.z_score,
            p_value: outcome.p_value,
            significant: outcome.significant,
            trials: distribution.trials(),
        })
    }

    fn check_trials(&self) -> Result<()> {
        if self.config.trials < 2 {
            return Err(FourTrackError::Configuration(format!(
                "Null model needs at least 2 trials, got {}",
                self.config.trials
            )));
        }
        Ok(())
    }

    /// Code stream of one reference sequence. DNA is generated at the processed base
    /// length and re-encoded so pair codes keep their base-level distribution.
    fn null_codes<R: Rng + ?Sized>(&self, sequence: &Sequence, rng: &mut R) -> Vec<u8> {
        let alphabet = sequence.alphabet();
        let length = match alphabet {
            Alphabet::Dna => sequence.len() - sequence.len() % 2,
            Alphabet::Digits => sequence.len(),
        };

        let symbols = match self.config.resampling {
            Resampling::Uniform => {
                let pool = alphabet.symbols();
                (0..length).map(|_| pool[rng.gen_range(0..pool.len())]).collect()
            }
            Resampling::Permutation => {
                let mut symbols = sequence.symbols()[..length].to_vec();
                symbols.shuffle(rng);
                symbols
            }
        };

        PairCodec::encode(&Sequence::from_validated(alphabet, symbols)).codes
    }
}

/// Compare the pair ratio of one track against `trials` uniform reference sequences
pub fn compare_to_null<R: Rng + ?Sized>(
    sequence: &Sequence,
    track: Track,
    trials: usize,
    rng: &mut R,
) -> Result<NullComparison> {
    let config = NullModelConfig {
        trials,
        ..NullModelConfig::default()
    };
    NullModelComparator::new(config, MetricsEngine::default()).compare_track(
        sequence,
        track,
        Statistic::PairRatio,
        rng,
    )
}
