use crate::engines::encoding::{attribute, Track, ATTRIBUTE_DIMENSIONS};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PairCount {
    pub valid: usize,
    pub total: usize,
    pub ratio: f64,
}

impl PairCount {
    pub fn new(valid: usize, total: usize) -> Self {
        Self {
            valid,
            total,
            ratio: if total > 0 { valid as f64 / total as f64 } else { 0.0 },
        }
    }
}

/// Partner pairs formed anywhere in the stream
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalPairing {
    pub valid: usize,
    /// Half the stream length
    pub total: usize,
    pub ratio: f64,
    /// Pairs formed per shared label
    pub pair_types: BTreeMap<String, usize>,
    /// Codes left over after pairing
    pub unpaired: BTreeMap<u8, usize>,
}

/// Attribute-complement matches over sliding windows (track 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowPairing {
    pub windows: usize,
    pub valid: usize,
    pub total: usize,
    pub ratio: f64,
}

pub fn global_pairing(codes: &[u8], track: Track) -> GlobalPairing {
    let mut remaining = [0usize; 10];
    for &c in codes {
        if let Some(slot) = remaining.get_mut(c as usize) {
            *slot += 1;
        }
    }

    let mut valid = 0;
    let mut pair_types = BTreeMap::new();
    for (a, b) in track.partner_pairs() {
        let formed = remaining[a as usize].min(remaining[b as usize]);
        if formed == 0 {
            continue;
        }
        valid += formed;
        remaining[a as usize] -= formed;
        remaining[b as usize] -= formed;
        if let Some(label) = track.label(a) {
            *pair_types.entry(label.name.to_string()).or_insert(0) += formed;
        }
    }

    let unpaired = remaining
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(code, &count)| (code as u8, count))
        .collect();

    let counts = PairCount::new(valid, codes.len() / 2);
    GlobalPairing {
        valid: counts.valid,
        total: counts.total,
        ratio: counts.ratio,
        pair_types,
        unpaired,
    }
}

/// Split each window into quarters p1..p4; for every attribute dimension (p1, p3) and
/// (p2, p4) count as a pair when their bit patterns are complements.
pub fn window_pairing(codes: &[u8], window_size: usize, step: usize) -> WindowPairing {
    if window_size < 4 || step == 0 || codes.len() < window_size {
        return WindowPairing::default();
    }

    let quarter = window_size / 4;
    let mut windows = 0;
    let mut valid = 0;
    let mut total = 0;

    for start in (0..=codes.len() - window_size).step_by(step) {
        let window = &codes[start..start + window_size];
        let parts: Vec<&[u8]> = window.chunks_exact(quarter).take(4).collect();
        windows += 1;

        for dim in 0..ATTRIBUTE_DIMENSIONS.len() {
            for (left, right) in [(parts[0], parts[2]), (parts[1], parts[3])] {
                if is_complement(left, right, dim) {
                    valid += 1;
                }
                total += 1;
            }
        }
    }

    let counts = PairCount::new(valid, total);
    WindowPairing {
        windows,
        valid,
        total,
        ratio: counts.ratio,
    }
}

fn is_complement(left: &[u8], right: &[u8], dim: usize) -> bool {
    left.iter()
        .zip(right)
        .all(|(&a, &b)| attribute(a, dim) != attribute(b, dim))
}

/// Non-overlapping neighbours `(c[2i], c[2i+1])` that are partners
pub fn adjacent_pairs(codes: &[u8], track: Track) -> PairCount {
    let pairs = codes.chunks_exact(2);
    let total = pairs.len();
    let valid = pairs.filter(|p| track.is_partner(p[0], p[1])).count();
    PairCount::new(valid, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_pairing_track_two() {
        // 1-8 pairs twice, 3-6 once, a 4 is left over
        let codes = [1, 8, 1, 8, 3, 6, 4];
        let result = global_pairing(&codes, Track::Two);
        assert_eq!(result.valid, 3);
        assert_eq!(result.total, 3);
        assert_eq!(result.ratio, 1.0);
        assert_eq!(result.pair_types.get("A"), Some(&2));
        assert_eq!(result.pair_types.get("C"), Some(&1));
        assert_eq!(result.unpaired.get(&4), Some(&1));
    }

    #[test]
    fn test_global_pairing_periodic() {
        let codes: Vec<u8> = [3, 5].repeat(11);
        // 3 and 5 are partners on none of the tracks
        assert_eq!(global_pairing(&codes, Track::Two).valid, 0);
        assert_eq!(global_pairing(&codes, Track::Three).valid, 0);
        assert_eq!(global_pairing(&codes, Track::Four).valid, 0);
    }

    #[test]
    fn test_global_pairing_empty() {
        let result = global_pairing(&[], Track::Three);
        assert_eq!(result.total, 0);
        assert_eq!(result.ratio, 0.0);
        assert!(result.unpaired.is_empty());
    }

    #[test]
    fn test_track_one_has_no_global_pairs() {
        let result = global_pairing(&[1, 8, 2, 7], Track::One);
        assert_eq!(result.valid, 0);
        assert_eq!(result.unpaired.len(), 4);
    }

    #[test]
    fn test_window_pairing_short_stream() {
        let result = window_pairing(&[1; 11], 12, 5);
        assert_eq!(result.windows, 0);
        assert_eq!(result.ratio, 0.0);
    }

    #[test]
    fn test_window_pairing_complement() {
        // 0 has all-zero attributes and 1 all-one, so [1,1,1] vs [0,0,0] is a
        // complement on every dimension
        let window = [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0];
        let result = window_pairing(&window, 12, 5);
        assert_eq!(result.windows, 1);
        assert_eq!(result.total, 8);
        assert_eq!(result.valid, 8);
        assert_eq!(result.ratio, 1.0);
    }

    #[test]
    fn test_window_count() {
        // starts 0, 5, 10 fit into 22 codes
        let result = window_pairing(&[3; 22], 12, 5);
        assert_eq!(result.windows, 3);
        assert_eq!(result.valid, 0);
    }

    #[test]
    fn test_adjacent_pairs() {
        let result = adjacent_pairs(&[0, 9, 9, 0, 2, 7, 5], Track::Two);
        assert_eq!(result.total, 3);
        assert_eq!(result.valid, 3);
        assert_eq!(adjacent_pairs(&[0, 9], Track::One).valid, 0);
    }
}
