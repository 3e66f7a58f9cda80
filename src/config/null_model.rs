use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::FourTrackError;
use crate::types::Statistic;
use serde::{Deserialize, Serialize};

/// Largest seed a TOML file can hold (TOML integers are signed 64-bit)
pub const MAX_SEED: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NullModelConfig {
    pub trials: usize,
    pub significance_threshold: f64,
    pub resampling: Resampling,
    pub p_value_method: PValueMethod,
    pub statistics: Vec<Statistic>,
    /// Unset means a seed is drawn once per run and recorded in the report
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    /// Each symbol drawn independently and uniformly from the alphabet
    Uniform,
    /// Shuffle of the observed symbols, composition preserved
    Permutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PValueMethod {
    Empirical,
    Normal,
}

impl Default for NullModelConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            significance_threshold: 0.05,
            resampling: Resampling::Uniform,
            p_value_method: PValueMethod::Empirical,
            statistics: vec![Statistic::PairRatio, Statistic::Symmetry],
            seed: None,
        }
    }
}

impl ConfigSection for NullModelConfig {
    fn section_name() -> &'static str {
        "null_model"
    }

    fn validate(&self) -> Result<(), FourTrackError> {
        if self.trials < 2 {
            return Err(FourTrackError::Configuration(format!(
                "Null model needs at least 2 trials, got {}",
                self.trials
            )));
        }
        if self.significance_threshold <= 0.0 || self.significance_threshold >= 1.0 {
            return Err(FourTrackError::Configuration(
                "Significance threshold must be between 0 and 1".to_string(),
            ));
        }
        if let Some(seed) = self.seed.filter(|&s| s > MAX_SEED) {
            return Err(FourTrackError::Configuration(format!(
                "Seed {} exceeds the largest storable seed {}",
                seed, MAX_SEED
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Null model".to_string(),
            fields: vec![
                FieldManifest::new(
                    "trials",
                    "integer",
                    serde_json::json!(1000),
                    "Random reference sequences per comparison",
                )
                .with_range(Some(2.0), None),
                FieldManifest::new(
                    "significance_threshold",
                    "float",
                    serde_json::json!(0.05),
                    "p-value below which a result is significant",
                )
                .with_range(Some(0.0), Some(1.0)),
                FieldManifest::new(
                    "resampling",
                    "enum(uniform|permutation)",
                    serde_json::json!("uniform"),
                    "How reference sequences are generated",
                ),
                FieldManifest::new(
                    "p_value_method",
                    "enum(empirical|normal)",
                    serde_json::json!("empirical"),
                    "Empirical tail count or normal approximation; both floored at 1/trials",
                ),
                FieldManifest::new(
                    "statistics",
                    "list(pair_ratio|symmetry)",
                    serde_json::json!(["pair_ratio", "symmetry"]),
                    "Statistics compared against the null model",
                ),
                FieldManifest::new(
                    "seed",
                    "integer?",
                    serde_json::Value::Null,
                    "Generator seed; drawn and recorded when unset",
                )
                .with_range(Some(0.0), Some(MAX_SEED as f64)),
            ],
        }
    }
}
