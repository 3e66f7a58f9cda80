use serde::Serialize;
use statrs::statistics::Statistics;

/// Population moments of the code values; all 0 for an empty stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// 0 below 3 codes or with zero spread
    pub skewness: f64,
    /// Excess kurtosis; 0 below 4 codes or with zero spread
    pub kurtosis: f64,
}

impl Moments {
    pub fn from_codes(codes: &[u8]) -> Self {
        if codes.is_empty() {
            return Self::default();
        }

        let values: Vec<f64> = codes.iter().map(|&c| f64::from(c)).collect();
        let mean = values.iter().mean();
        let variance = values.iter().population_variance();
        let std_dev = variance.sqrt();

        let n = values.len() as f64;
        let central = |power: i32| values.iter().map(|x| (x - mean).powi(power)).sum::<f64>() / n;
        let skewness = if values.len() >= 3 && std_dev > 0.0 {
            central(3) / std_dev.powi(3)
        } else {
            0.0
        };
        let kurtosis = if values.len() >= 4 && std_dev > 0.0 {
            central(4) / std_dev.powi(4) - 3.0
        } else {
            0.0
        };

        Self {
            mean,
            variance,
            std_dev,
            skewness,
            kurtosis,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ParityCounts {
    pub even: usize,
    pub odd: usize,
    pub even_fraction: f64,
}

impl ParityCounts {
    pub fn from_codes(codes: &[u8]) -> Self {
        let even = codes.iter().filter(|&&c| c % 2 == 0).count();
        Self {
            even,
            odd: codes.len() - even,
            even_fraction: if codes.is_empty() {
                0.0
            } else {
                even as f64 / codes.len() as f64
            },
        }
    }
}

/// Runs of identical consecutive codes against the count expected from the code frequencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunsTest {
    pub runs: usize,
    pub expected_runs: f64,
    pub std_runs: f64,
    /// 0 when the run count has no spread
    pub z_score: f64,
}

impl RunsTest {
    pub fn from_codes(codes: &[u8]) -> Self {
        let n = codes.len();
        if n < 2 {
            return Self::default();
        }

        let runs = 1 + codes.windows(2).filter(|w| w[0] != w[1]).count();

        let mut counts = [0usize; 10];
        for &c in codes {
            if let Some(slot) = counts.get_mut(c as usize) {
                *slot += 1;
            }
        }
        let n_f = n as f64;
        let proportions: Vec<f64> = counts.iter().map(|&c| c as f64 / n_f).collect();

        let expected_runs = 1.0 + 2.0 * n_f * proportions.iter().map(|p| p * (1.0 - p)).sum::<f64>();
        let variance = 2.0 * (2.0 * n_f - 3.0)
            * proportions.iter().map(|p| (p * (1.0 - p)).powi(2)).sum::<f64>()
            - (expected_runs - 1.0).powi(2) / (n_f - 1.0);
        let std_runs = variance.max(0.0).sqrt();

        Self {
            runs,
            expected_runs,
            std_runs,
            z_score: if std_runs > 0.0 {
                (runs as f64 - expected_runs) / std_runs
            } else {
                0.0
            },
        }
    }
}

/// Nearest-rank percentiles: the code at index `floor(n * q)` of the sorted stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Percentiles {
    pub p10: u8,
    pub p25: u8,
    pub p50: u8,
    pub p75: u8,
    pub p90: u8,
}

impl Percentiles {
    pub fn from_codes(codes: &[u8]) -> Option<Self> {
        if codes.is_empty() {
            return None;
        }
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        let at = |q: f64| {
            let index = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
            sorted[index]
        };

        Some(Self {
            p10: at(0.10),
            p25: at(0.25),
            p50: at(0.50),
            p75: at(0.75),
            p90: at(0.90),
        })
    }
}

/// Pearson correlation between each code and its successor; 0 when undefined
pub fn lag_correlation(codes: &[u8]) -> f64 {
    if codes.len() < 3 {
        return 0.0;
    }
    let x: Vec<f64> = codes[..codes.len() - 1].iter().map(|&c| f64::from(c)).collect();
    let y: Vec<f64> = codes[1..].iter().map(|&c| f64::from(c)).collect();

    let mean_x = x.iter().mean();
    let mean_y = y.iter().mean();
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(&y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator > 0.0 {
        cov / denominator
    } else {
        0.0
    }
}

/// Distribution-level summary of a code stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub moments: Moments,
    pub parity: ParityCounts,
    pub lag_correlation: f64,
    pub runs: RunsTest,
    pub percentiles: Option<Percentiles>,
}

impl DescriptiveStats {
    pub fn from_codes(codes: &[u8]) -> Self {
        Self {
            count: codes.len(),
            moments: Moments::from_codes(codes),
            parity: ParityCounts::from_codes(codes),
            lag_correlation: lag_correlation(codes),
            runs: RunsTest::from_codes(codes),
            percentiles: Percentiles::from_codes(codes),
        }
    }
}
