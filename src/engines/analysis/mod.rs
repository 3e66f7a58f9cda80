pub mod analyzer;
pub mod batch;

pub use analyzer::{Interpretation, SequenceAnalyzer, SequenceMetadata, SequenceReport};
pub use batch::{BatchAnalyzer, BatchComparison, BatchResult, FailedSequence, RangeStats};
