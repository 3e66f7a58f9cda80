use crate::error::{FourTrackError, Result};
use crate::types::{Alphabet, Sequence};

pub struct SequenceValidator;

impl SequenceValidator {
    /// Clean and validate raw text against an alphabet.
    ///
    /// Whitespace is stripped and DNA is upper-cased before checking. Decimal points
    /// are accepted in digit mode and dropped afterwards, so `3.14` and `314` yield the
    /// same sequence. Empty input is a valid, empty sequence.
    pub fn validate(raw: &str, alphabet: Alphabet) -> Result<Sequence> {
        let mut symbols = Vec::with_capacity(raw.len());

        for (position, c) in raw.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let c = match alphabet {
                Alphabet::Dna => c.to_ascii_uppercase(),
                Alphabet::Digits => c,
            };

            if !alphabet.accepts(c) {
                return Err(FourTrackError::InvalidSymbol {
                    symbol: c,
                    position,
                    allowed: Self::describe_allowed(alphabet),
                });
            }

            if c != '.' {
                symbols.push(c as u8);
            }
        }

        Ok(Sequence::from_validated(alphabet, symbols))
    }

    /// Guess the alphabet from the first `sample_len` non-whitespace characters.
    ///
    /// Digits win only when digits and decimal points make up more than `digits_ratio`
    /// of the sample. Everything else is read as DNA, so letters are always checked
    /// against the DNA alphabet and a bad base is reported as itself.
    pub fn detect_alphabet(raw: &str, sample_len: usize, digits_ratio: f64) -> Alphabet {
        let sample: Vec<char> = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(sample_len)
            .collect();

        if sample.is_empty() {
            return Alphabet::Dna;
        }

        let digit_count = sample.iter().filter(|&&c| Alphabet::Digits.accepts(c)).count();

        if digit_count as f64 / sample.len() as f64 > digits_ratio {
            Alphabet::Digits
        } else {
            Alphabet::Dna
        }
    }

    fn describe_allowed(alphabet: Alphabet) -> String {
        alphabet
            .allowed()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
