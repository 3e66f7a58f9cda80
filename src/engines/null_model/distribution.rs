use crate::config::PValueMethod;
use crate::error::{FourTrackError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Observed value judged against a null sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Significance {
    pub observed: f64,
    pub z_score: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Statistic values computed over the random reference sequences
#[derive(Debug, Clone)]
pub struct NullDistribution {
    samples: Vec<f64>,
    mean: f64,
    std_dev: f64,
}

impl NullDistribution {
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(FourTrackError::Configuration(format!(
                "Null distribution needs at least 2 samples, got {}",
                samples.len()
            )));
        }

        // identical samples: exact mean and zero spread, free of summation rounding
        let first = samples[0];
        if samples.iter().all(|&x| x == first) {
            return Ok(Self {
                samples,
                mean: first,
                std_dev: 0.0,
            });
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        Ok(Self {
            samples,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    /// Smallest reportable p-value for this sample size
    pub fn p_floor(&self) -> f64 {
        1.0 / self.samples.len() as f64
    }

    pub fn z_score(&self, observed: f64) -> f64 {
        if self.std_dev > 0.0 {
            (observed - self.mean) / self.std_dev
        } else {
            0.0
        }
    }

    /// Two-sided share of null samples at least as far from the mean as `observed`
    pub fn empirical_p(&self, observed: f64) -> f64 {
        let distance = (observed - self.mean).abs();
        let extreme = self
            .samples
            .iter()
            .filter(|x| (*x - self.mean).abs() >= distance)
            .count();
        extreme.max(1) as f64 / self.samples.len() as f64
    }

    pub fn normal_p(&self, observed: f64) -> Result<f64> {
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| FourTrackError::Computation(format!("Standard normal: {}", e)))?;
        let z = self.z_score(observed).abs();
        Ok((2.0 * (1.0 - normal.cdf(z))).max(self.p_floor()).min(1.0))
    }

    pub fn compare(&self, observed: f64, method: PValueMethod, threshold: f64) -> Result<Significance> {
        let p_value = match method {
            PValueMethod::Empirical => self.empirical_p(observed),
            PValueMethod::Normal => self.normal_p(observed)?,
        };

        Ok(Significance {
            observed,
            z_score: self.z_score(observed),
            p_value,
            significant: p_value < threshold,
        })
    }
}
