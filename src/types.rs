use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol alphabet a sequence is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    Dna,    // A, C, G, T
    Digits, // 0-9, decimal points dropped
}

impl Alphabet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dna => "dna",
            Self::Digits => "digits",
        }
    }

    /// Characters accepted by the validator (before decimal points are dropped)
    pub fn allowed(&self) -> &'static str {
        match self {
            Self::Dna => "ACGT",
            Self::Digits => "0123456789.",
        }
    }

    pub fn accepts(&self, c: char) -> bool {
        self.allowed().contains(c)
    }

    /// Symbols a null-model generator draws from
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Self::Dna => b"ACGT",
            Self::Digits => b"0123456789",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, immutable symbol sequence.
///
/// DNA symbols are stored as upper-case ASCII bases, digit symbols as ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    alphabet: Alphabet,
    symbols: Vec<u8>,
}

impl Sequence {
    /// Only the validator and the null-model generators build sequences, so the
    /// symbols are known to belong to the alphabet.
    pub(crate) fn from_validated(alphabet: Alphabet, symbols: Vec<u8>) -> Self {
        Self { alphabet, symbols }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_str(&self) -> &str {
        // Validated symbols are always ASCII
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

/// Symbol a track assigns to a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Label {
    pub name: &'static str,
    pub polarity: Polarity,
}

impl Label {
    pub const fn yang(name: &'static str) -> Self {
        Self { name, polarity: Polarity::Yang }
    }

    pub const fn yin(name: &'static str) -> Self {
        Self { name, polarity: Polarity::Yin }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Whether a base pair was read in its canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Forward,
    Reverse,
}

/// Statistic a null-model comparison is run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    PairRatio,
    Symmetry,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PairRatio => "pair_ratio",
            Self::Symmetry => "symmetry",
        }
    }
}
