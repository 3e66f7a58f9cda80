use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const MIN_REPEAT_LENGTH: usize = 2;
const MAX_REPEAT_LENGTH: usize = 20;
const MIN_REPETITIONS: usize = 2;
/// A code bigram must occur this often to count as a pair pattern
const MIN_PAIR_COUNT: usize = 3;
const MAX_PAIR_PATTERNS: usize = 10;
/// Patterns kept in the summary, highest score first
const REPORTED_PATTERNS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Repetition,
    Increasing,
    Decreasing,
    Pair,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repetition => "repetition",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Pair => "pair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub codes: Vec<u8>,
    pub count: usize,
    pub positions: Vec<usize>,
    pub score: usize,
}

impl Pattern {
    fn coverage(&self) -> usize {
        self.codes.len() * self.count
    }
}

/// Recurring structures in a code stream
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternSummary {
    pub total_patterns: usize,
    /// Longest block immediately followed by a copy of itself
    pub repetition_score: usize,
    /// Occurrences of the most frequent adjacent pair
    pub pair_score: usize,
    /// Triples stepping by one in either direction
    pub sequential_score: usize,
    /// Codes covered by detected patterns per code; overlaps counted every time
    pub pattern_density: f64,
    pub by_kind: BTreeMap<PatternKind, usize>,
    pub top_patterns: Vec<Pattern>,
}

impl PatternSummary {
    pub fn detect(codes: &[u8]) -> Self {
        let mut patterns = repeated_blocks(codes);
        patterns.extend(monotone_runs(codes));
        patterns.extend(frequent_pairs(codes));

        let mut by_kind = BTreeMap::new();
        for p in &patterns {
            *by_kind.entry(p.kind).or_insert(0) += 1;
        }

        let pattern_density = if codes.is_empty() {
            0.0
        } else {
            patterns.iter().map(Pattern::coverage).sum::<usize>() as f64 / codes.len() as f64
        };
        let total_patterns = patterns.len();

        patterns.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.positions.first().cmp(&b.positions.first()))
        });
        patterns.truncate(REPORTED_PATTERNS);

        Self {
            total_patterns,
            repetition_score: repetition_score(codes),
            pair_score: pair_counts(codes).values().map(|v| v.len()).max().unwrap_or(0),
            sequential_score: sequential_score(codes),
            pattern_density,
            by_kind,
            top_patterns: patterns,
        }
    }
}

/// Blocks of 2..=20 codes occurring at least twice, overlaps allowed
fn repeated_blocks(codes: &[u8]) -> Vec<Pattern> {
    let longest = MAX_REPEAT_LENGTH.min(codes.len() / 2);
    let mut patterns = Vec::new();

    for length in MIN_REPEAT_LENGTH..=longest {
        let mut positions: HashMap<&[u8], Vec<usize>> = HashMap::new();
        for (start, block) in codes.windows(length).enumerate() {
            positions.entry(block).or_default().push(start);
        }

        let mut found: Vec<Pattern> = positions
            .into_iter()
            .filter(|(_, at)| at.len() >= MIN_REPETITIONS)
            .map(|(block, at)| Pattern {
                kind: PatternKind::Repetition,
                codes: block.to_vec(),
                count: at.len(),
                score: at.len() * length,
                positions: at,
            })
            .collect();
        found.sort_by_key(|p| p.positions[0]);
        patterns.extend(found);
    }
    patterns
}

/// Maximal runs of at least three codes stepping by +1 or -1
fn monotone_runs(codes: &[u8]) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    let mut i = 0;

    while i + 2 < codes.len() {
        let step = i16::from(codes[i + 1]) - i16::from(codes[i]);
        let continues = i16::from(codes[i + 2]) - i16::from(codes[i + 1]) == step;

        if step.abs() == 1 && continues {
            let start = i;
            while i + 1 < codes.len() && i16::from(codes[i + 1]) - i16::from(codes[i]) == step {
                i += 1;
            }
            let run = &codes[start..=i];
            patterns.push(Pattern {
                kind: if step > 0 {
                    PatternKind::Increasing
                } else {
                    PatternKind::Decreasing
                },
                codes: run.to_vec(),
                count: 1,
                positions: vec![start],
                score: run.len(),
            });
        } else {
            i += 1;
        }
    }
    patterns
}

fn pair_counts(codes: &[u8]) -> HashMap<(u8, u8), Vec<usize>> {
    let mut pairs: HashMap<(u8, u8), Vec<usize>> = HashMap::new();
    for (i, w) in codes.windows(2).enumerate() {
        pairs.entry((w[0], w[1])).or_default().push(i);
    }
    pairs
}

/// The ten most frequent adjacent pairs seen at least three times
fn frequent_pairs(codes: &[u8]) -> Vec<Pattern> {
    let mut pairs: Vec<((u8, u8), Vec<usize>)> = pair_counts(codes)
        .into_iter()
        .filter(|(_, at)| at.len() >= MIN_PAIR_COUNT)
        .collect();
    pairs.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.1[0].cmp(&b.1[0])));

    pairs
        .into_iter()
        .take(MAX_PAIR_PATTERNS)
        .map(|((a, b), at)| Pattern {
            kind: PatternKind::Pair,
            codes: vec![a, b],
            count: at.len(),
            score: at.len() * 2,
            positions: at,
        })
        .collect()
}

fn repetition_score(codes: &[u8]) -> usize {
    (2..=10)
        .filter(|&length| {
            codes
                .windows(length * 2)
                .any(|w| w[..length] == w[length..])
        })
        .max()
        .unwrap_or(0)
}

fn sequential_score(codes: &[u8]) -> usize {
    codes
        .windows(3)
        .filter(|w| w[0].abs_diff(w[1]) == 1 && w[1].abs_diff(w[2]) == 1)
        .count()
}
