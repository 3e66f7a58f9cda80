use crate::engines::metrics::MetricsEngine;
use crate::error::FourTrackError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub test_name: String,
    pub passed: bool,
    pub score: f64,           // 0.0 to 1.0 (1.0 = perfect)
    pub details: serde_json::Value,
    pub interpretation: String,
    /// Error message, verbatim, when the case could not be analysed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub execution_ms: f64,
}

impl TestResult {
    pub fn from_error(test_name: &str, error: &FourTrackError) -> Self {
        let message = error.to_string();
        Self {
            test_name: test_name.to_string(),
            passed: false,
            score: 0.0,
            details: serde_json::json!({ "validation_error": error.is_validation() }),
            interpretation: format!("Analysis aborted: {}", message),
            error: Some(message),
            execution_ms: 0.0,
        }
    }
}

pub trait RobustnessTest: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run the robustness test
    fn run(&self, engine: &MetricsEngine) -> Result<TestResult, FourTrackError>;
}
