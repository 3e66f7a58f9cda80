use super::pair_codec::PairCodec;
use crate::types::{Label, Sequence};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute bits (small/large, up/down, odd/even, a/b relation) for codes 0-9
const ATTRIBUTES: [[u8; 4]; 10] = [
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [1, 1, 0, 1],
    [1, 1, 1, 1],
    [1, 0, 0, 1],
    [1, 0, 1, 0],
    [1, 1, 0, 0],
    [1, 1, 1, 0],
    [0, 1, 0, 0],
    [0, 0, 1, 1],
];

pub const ATTRIBUTE_DIMENSIONS: [&str; 4] = ["small_large", "up_down", "odd_even", "ab_relation"];

const YANG: Label = Label::yang("Yang");
const YIN: Label = Label::yin("Yin");

const TRACK_ONE: [Label; 10] = [YIN, YANG, YANG, YANG, YANG, YANG, YANG, YANG, YIN, YIN];

const A: Label = Label::yang("A");
const B: Label = Label::yin("B");
const C: Label = Label::yang("C");
const D: Label = Label::yin("D");
const E: Label = Label::yang("E");
const TRACK_TWO: [Label; 10] = [E, A, B, C, D, D, C, B, A, E];

const JIA: Label = Label::yang("Jia");
const YI: Label = Label::yin("Yi");
const BING: Label = Label::yang("Bing");
const DING: Label = Label::yin("Ding");
const WU: Label = Label::yang("Wu");
const TRACK_THREE: [Label; 10] = [WU, JIA, YI, BING, DING, WU, DING, BING, YI, JIA];

const ONE: Label = Label::yang("One");
const TWO: Label = Label::yin("Two");
const THREE: Label = Label::yang("Three");
const FOUR: Label = Label::yin("Four");
const FIVE: Label = Label::yang("Five");
const TRACK_FOUR: [Label; 10] = [FIVE, ONE, TWO, THREE, FOUR, TWO, THREE, FOUR, ONE, FIVE];

/// One of the four fixed code → label tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    One,
    Two,
    Three,
    Four,
}

impl Track {
    pub fn all() -> [Track; 4] {
        [Track::One, Track::Two, Track::Three, Track::Four]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::One => "track1",
            Track::Two => "track2",
            Track::Three => "track3",
            Track::Four => "track4",
        }
    }

    pub fn labels(&self) -> &'static [Label; 10] {
        match self {
            Track::One => &TRACK_ONE,
            Track::Two => &TRACK_TWO,
            Track::Three => &TRACK_THREE,
            Track::Four => &TRACK_FOUR,
        }
    }

    /// Label of a single code; codes outside 0-9 have no label
    pub fn label(&self, code: u8) -> Option<Label> {
        self.labels().get(code as usize).copied()
    }

    /// Track 1 scores attribute windows instead of code partners
    pub fn uses_windows(&self) -> bool {
        matches!(self, Track::One)
    }

    /// The other code sharing this code's label, if the track pairs codes
    pub fn partner(&self, code: u8) -> Option<u8> {
        if self.uses_windows() {
            return None;
        }
        let label = self.label(code)?;
        (0..10u8).find(|&other| other != code && self.labels()[other as usize] == label)
    }

    /// Unordered partner pairs `(low, high)` in code order
    pub fn partner_pairs(&self) -> Vec<(u8, u8)> {
        (0..10u8)
            .filter_map(|code| self.partner(code).filter(|&p| p > code).map(|p| (code, p)))
            .collect()
    }

    pub fn is_partner(&self, a: u8, b: u8) -> bool {
        self.partner(a) == Some(b)
    }

    /// Distinct labels in first-seen code order
    pub fn distinct_labels(&self) -> Vec<Label> {
        let mut seen: Vec<Label> = Vec::new();
        for label in self.labels() {
            if !seen.contains(label) {
                seen.push(*label);
            }
        }
        seen
    }

    pub fn remap_codes(&self, codes: &[u8]) -> Vec<Label> {
        codes.iter().filter_map(|&c| self.label(c)).collect()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute bit of `code` along dimension `dim` (0-3)
pub fn attribute(code: u8, dim: usize) -> u8 {
    ATTRIBUTES
        .get(code as usize)
        .and_then(|row| row.get(dim))
        .copied()
        .unwrap_or(0)
}

/// Encode a sequence and look every code up in the track's table
pub fn remap(sequence: &Sequence, track: Track) -> Vec<Label> {
    let encoded = PairCodec::encode(sequence);
    track.remap_codes(&encoded.codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SequenceValidator;
    use crate::types::{Alphabet, Polarity};

    #[test]
    fn test_track_two_partners_sum_to_nine() {
        for (a, b) in Track::Two.partner_pairs() {
            assert_eq!(a + b, 9);
        }
        assert_eq!(Track::Two.partner_pairs().len(), 5);
    }

    #[test]
    fn test_track_three_partners_sum_to_ten() {
        let pairs = Track::Three.partner_pairs();
        assert!(pairs.contains(&(0, 5)));
        for (a, b) in pairs.into_iter().filter(|&(a, _)| a != 0) {
            assert_eq!(a + b, 10);
        }
    }

    #[test]
    fn test_track_four_groups() {
        assert_eq!(
            Track::Four.partner_pairs(),
            vec![(0, 9), (1, 8), (2, 5), (3, 6), (4, 7)]
        );
    }

    #[test]
    fn test_track_one_has_no_partners() {
        assert!(Track::One.partner_pairs().is_empty());
        assert_eq!(Track::One.label(0).unwrap().polarity, Polarity::Yin);
        assert_eq!(Track::One.label(4).unwrap().polarity, Polarity::Yang);
        assert_eq!(Track::One.label(9).unwrap().polarity, Polarity::Yin);
    }

    #[test]
    fn test_remap_is_total_and_deterministic() {
        let seq = SequenceValidator::validate("ACGTTGCAAGGCCTTA", Alphabet::Dna).unwrap();
        for track in Track::all() {
            let first = remap(&seq, track);
            assert_eq!(first.len(), 8);
            assert_eq!(first, remap(&seq, track));
        }
    }

    #[test]
    fn test_remap_periodic_dna_on_track_two() {
        let seq = SequenceValidator::validate(&"ATCG".repeat(11), Alphabet::Dna).unwrap();
        let names: Vec<&str> = remap(&seq, Track::Two).iter().take(4).map(|l| l.name).collect();
        assert_eq!(names, vec!["C", "D", "C", "D"]);
    }

    #[test]
    fn test_yang_sets() {
        let yang: Vec<&str> = Track::Three
            .distinct_labels()
            .into_iter()
            .filter(|l| l.polarity == Polarity::Yang)
            .map(|l| l.name)
            .collect();
        assert_eq!(yang, vec!["Wu", "Jia", "Bing"]);
    }
}
