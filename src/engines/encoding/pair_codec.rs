use crate::error::{FourTrackError, Result};
use crate::types::{Alphabet, Orientation, Sequence};
use serde::Serialize;

/// Canonical base pair for each code 0-9
const CODE_TO_PAIR: [[u8; 2]; 10] = [
    *b"AA", *b"AC", *b"AG", *b"AT", *b"CC", *b"CG", *b"CT", *b"GG", *b"GT", *b"TT",
];

/// Code stream of a sequence: base-pair codes for DNA, the digits themselves otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedSequence {
    pub alphabet: Alphabet,
    pub codes: Vec<u8>,
    /// One entry per code for DNA, empty for digit sequences
    pub orientations: Vec<Orientation>,
    /// Symbols that took part in encoding (an odd trailing base is dropped)
    pub processed_len: usize,
    pub truncated: bool,
}

impl EncodedSequence {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn preview(&self, n: usize) -> Vec<u8> {
        self.codes.iter().take(n).copied().collect()
    }

    pub fn reversed(&self) -> Vec<u8> {
        self.codes.iter().rev().copied().collect()
    }
}

pub struct PairCodec;

impl PairCodec {
    pub fn encode(sequence: &Sequence) -> EncodedSequence {
        match sequence.alphabet() {
            Alphabet::Dna => Self::encode_dna(sequence.symbols()),
            Alphabet::Digits => EncodedSequence {
                alphabet: Alphabet::Digits,
                codes: sequence.symbols().iter().map(|b| b - b'0').collect(),
                orientations: Vec::new(),
                processed_len: sequence.len(),
                truncated: false,
            },
        }
    }

    fn encode_dna(bases: &[u8]) -> EncodedSequence {
        let truncated = bases.len() % 2 != 0;
        if truncated {
            log::warn!(
                "Odd sequence length {}, dropping trailing base '{}'",
                bases.len(),
                bases[bases.len() - 1] as char
            );
        }

        let (codes, orientations): (Vec<u8>, Vec<Orientation>) = bases
            .chunks_exact(2)
            .map(|pair| Self::pair_code(pair[0], pair[1]))
            .unzip();

        EncodedSequence {
            alphabet: Alphabet::Dna,
            processed_len: codes.len() * 2,
            codes,
            orientations,
            truncated,
        }
    }

    /// Code and orientation of one base pair; inputs are validated upper-case bases
    pub fn pair_code(first: u8, second: u8) -> (u8, Orientation) {
        let rank = |b: u8| match b {
            b'A' => 0u8,
            b'C' => 1,
            b'G' => 2,
            _ => 3,
        };
        let (lo, hi) = (rank(first).min(rank(second)), rank(first).max(rank(second)));
        // Row offsets of the upper triangle: AA..AT, CC..CT, GG..GT, TT
        let code = [0u8, 4, 7, 9][lo as usize] + (hi - lo);
        let orientation = if rank(first) <= rank(second) {
            Orientation::Forward
        } else {
            Orientation::Reverse
        };
        (code, orientation)
    }

    /// Rebuild the processed base string from codes and orientations
    pub fn decode(encoded: &EncodedSequence) -> Result<String> {
        if encoded.alphabet != Alphabet::Dna {
            return Err(FourTrackError::Computation(
                "Only DNA code streams can be decoded".to_string(),
            ));
        }
        if encoded.orientations.len() != encoded.codes.len() {
            return Err(FourTrackError::Computation(format!(
                "{} codes but {} orientation marks",
                encoded.codes.len(),
                encoded.orientations.len()
            )));
        }

        let mut bases = String::with_capacity(encoded.codes.len() * 2);
        for (&code, orientation) in encoded.codes.iter().zip(&encoded.orientations) {
            let pair = CODE_TO_PAIR.get(code as usize).ok_or_else(|| {
                FourTrackError::Computation(format!("Code {} is outside 0-9", code))
            })?;
            let (a, b) = match orientation {
                Orientation::Forward => (pair[0], pair[1]),
                Orientation::Reverse => (pair[1], pair[0]),
            };
            bases.push(a as char);
            bases.push(b as char);
        }
        Ok(bases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SequenceValidator;

    fn dna(s: &str) -> Sequence {
        SequenceValidator::validate(s, Alphabet::Dna).unwrap()
    }

    #[test]
    fn test_pair_table() {
        let expected = [
            ("AA", 0), ("AC", 1), ("AG", 2), ("AT", 3),
            ("CA", 1), ("CC", 4), ("CG", 5), ("CT", 6),
            ("GA", 2), ("GC", 5), ("GG", 7), ("GT", 8),
            ("TA", 3), ("TC", 6), ("TG", 8), ("TT", 9),
        ];
        for (pair, code) in expected {
            let b = pair.as_bytes();
            assert_eq!(PairCodec::pair_code(b[0], b[1]).0, code, "pair {pair}");
        }
    }

    #[test]
    fn test_orientation() {
        assert_eq!(PairCodec::pair_code(b'C', b'G').1, Orientation::Forward);
        assert_eq!(PairCodec::pair_code(b'G', b'C').1, Orientation::Reverse);
        assert_eq!(PairCodec::pair_code(b'T', b'T').1, Orientation::Forward);
    }

    #[test]
    fn test_periodic_preview() {
        let encoded = PairCodec::encode(&dna(&"ATCG".repeat(11)));
        assert_eq!(encoded.len(), 22);
        assert_eq!(encoded.preview(6), vec![3, 5, 3, 5, 3, 5]);
    }

    #[test]
    fn test_odd_length_truncates() {
        let encoded = PairCodec::encode(&dna("ACGTACG"));
        assert!(encoded.truncated);
        assert_eq!(encoded.processed_len, 6);
        assert_eq!(PairCodec::decode(&encoded).unwrap(), "ACGTAC");
    }

    #[test]
    fn test_round_trip() {
        let input = "GATTACACCGGTTGCA";
        let encoded = PairCodec::encode(&dna(input));
        assert_eq!(PairCodec::decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_digits_pass_through() {
        let seq = SequenceValidator::validate("3.1415", Alphabet::Digits).unwrap();
        let encoded = PairCodec::encode(&seq);
        assert_eq!(encoded.codes, vec![3, 1, 4, 1, 5]);
        assert!(encoded.orientations.is_empty());
        assert!(PairCodec::decode(&encoded).is_err());
    }

    #[test]
    fn test_empty() {
        let encoded = PairCodec::encode(&dna(""));
        assert!(encoded.is_empty());
        assert!(!encoded.truncated);
        assert_eq!(PairCodec::decode(&encoded).unwrap(), "");
    }
}
