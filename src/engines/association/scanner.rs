use crate::data::ConstantDigits;
use crate::engines::metrics::CodeDistribution;
use crate::error::{FourTrackError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// How closely a code stream follows the digits of one constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationResult {
    pub constant: String,
    pub window_size: usize,
    pub windows: usize,
    pub matched_windows: usize,
    /// matched_windows / windows, in [0, 1]
    pub score: f64,
    /// Longest contiguous run shared with the constant
    pub matched_length: usize,
    /// Window starts (in the analysed stream) whose text occurs in the constant
    pub positions: Vec<usize>,
    pub prefix_similarity: f64,
    pub distribution_similarity: f64,
}

/// Exact-match scan of every `window_size` window of `codes` against the constant
pub fn associate(codes: &[u8], constant: &ConstantDigits, window_size: usize) -> Result<AssociationResult> {
    if window_size == 0 {
        return Err(FourTrackError::Configuration(
            "Association window size must be at least 1".to_string(),
        ));
    }

    let digits = &constant.digits;
    let known: HashSet<&[u8]> = digits.windows(window_size).collect();

    let positions: Vec<usize> = codes
        .windows(window_size)
        .enumerate()
        .filter(|(_, window)| known.contains(window))
        .map(|(start, _)| start)
        .collect();

    let windows = if codes.len() >= window_size {
        codes.len() - window_size + 1
    } else {
        0
    };
    let score = if windows > 0 {
        positions.len() as f64 / windows as f64
    } else {
        0.0
    };

    Ok(AssociationResult {
        constant: constant.name.clone(),
        window_size,
        windows,
        matched_windows: positions.len(),
        score,
        matched_length: longest_common_run(codes, digits),
        positions,
        prefix_similarity: prefix_similarity(codes, digits),
        distribution_similarity: distribution_similarity(codes, digits),
    })
}

/// Length of the longest common substring
pub fn longest_common_run(a: &[u8], b: &[u8]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    let mut best = 0;

    for &x in a {
        for (j, &y) in b.iter().enumerate() {
            current[j + 1] = if x == y { previous[j] + 1 } else { 0 };
            best = best.max(current[j + 1]);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

pub fn prefix_similarity(a: &[u8], b: &[u8]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let agree = a.iter().zip(b).filter(|(x, y)| x == y).count();
    agree as f64 / n as f64
}

/// One minus the total variation distance between the two digit distributions
pub fn distribution_similarity(a: &[u8], b: &[u8]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let p = CodeDistribution::from_codes(a).proportions();
    let q = CodeDistribution::from_codes(b).proportions();
    let distance: f64 = p.iter().zip(&q).map(|(x, y)| (x - y).abs()).sum::<f64>() / 2.0;
    (1.0 - distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(digits: &[u8]) -> ConstantDigits {
        ConstantDigits {
            name: "test".to_string(),
            digits: digits.to_vec(),
            source: "inline".to_string(),
        }
    }

    #[test]
    fn test_full_match() {
        let pi = constant(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let result = associate(&[3, 1, 4, 1, 5], &pi, 4).unwrap();
        assert_eq!(result.windows, 2);
        assert_eq!(result.positions, vec![0, 1]);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.matched_length, 5);
        assert_eq!(result.prefix_similarity, 1.0);
    }

    #[test]
    fn test_partial_match_positions() {
        let c = constant(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let result = associate(&[0, 0, 4, 5, 6, 7, 0], &c, 3).unwrap();
        assert_eq!(result.windows, 5);
        assert_eq!(result.positions, vec![2, 3]);
        assert!((result.score - 0.4).abs() < 1e-12);
        assert_eq!(result.matched_length, 4);
    }

    #[test]
    fn test_shorter_than_window() {
        let c = constant(&[1, 2, 3]);
        let result = associate(&[1, 2], &c, 4).unwrap();
        assert_eq!(result.windows, 0);
        assert_eq!(result.score, 0.0);
        assert!(result.positions.is_empty());
        assert_eq!(result.matched_length, 2);
    }

    #[test]
    fn test_zero_window_rejected() {
        let c = constant(&[1, 2, 3]);
        assert!(matches!(
            associate(&[1, 2], &c, 0),
            Err(FourTrackError::Configuration(_))
        ));
    }

    #[test]
    fn test_distribution_similarity() {
        assert_eq!(distribution_similarity(&[1, 2, 1, 2], &[2, 1]), 1.0);
        assert_eq!(distribution_similarity(&[1, 1], &[2, 2]), 0.0);
        assert_eq!(distribution_similarity(&[], &[2, 2]), 0.0);
    }
}
