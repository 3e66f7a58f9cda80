pub mod aggregator;
pub mod json;
pub mod markdown;

pub use aggregator::{EvaluationReport, Grade, PerformanceSummary, ReportAggregator, RunMetadata};
pub use json::{to_json, write_json, write_text};
pub use markdown::{render_evaluation, render_sequence};
