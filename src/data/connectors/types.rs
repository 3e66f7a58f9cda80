use crate::types::Alphabet;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the alphabet of an input file is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    #[default]
    Auto,
    Dna,
    Digits,
}

impl SequenceKind {
    pub fn fixed(&self) -> Option<Alphabet> {
        match self {
            Self::Auto => None,
            Self::Dna => Some(Alphabet::Dna),
            Self::Digits => Some(Alphabet::Digits),
        }
    }
}

/// Raw text read from disk, not yet validated
#[derive(Debug, Clone)]
pub struct RawSequence {
    pub name: String,
    pub path: Option<PathBuf>,
    pub content: String,
    pub alphabet: Alphabet,
}

/// Metadata about a loaded input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub name: String,
    pub alphabet: Alphabet,
    pub num_chars: usize,
    pub num_lines: usize,
}
