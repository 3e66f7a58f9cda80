pub mod composition;
pub mod descriptive;
pub mod engine;
pub mod entropy;
pub mod pairing;
pub mod patterns;

pub use composition::{BaseComposition, CodeDistribution, GcBand, PolarityComposition};
pub use descriptive::{lag_correlation, DescriptiveStats, Moments, ParityCounts, Percentiles, RunsTest};
pub use engine::{
    AggregateResult, FourTrackAnalysis, FourTrackSummary, MetricsEngine, Symmetry, TrackAnalysis,
    TrackRank, TrackScore,
};
pub use entropy::{label_entropy, shannon_entropy};
pub use pairing::{GlobalPairing, PairCount, WindowPairing};
pub use patterns::{Pattern, PatternKind, PatternSummary};
