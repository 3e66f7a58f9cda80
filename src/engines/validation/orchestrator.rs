use super::robustness::{standard_suite, RobustnessTest, TestResult};
use crate::engines::metrics::MetricsEngine;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobustnessReport {
    pub suite_id: String,
    pub timestamp: String,
    pub test_results: Vec<TestResult>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub overall_score: f64,
    pub passed_all: bool,
    pub average_time_ms: f64,
    pub summary: String,
}

pub struct ValidationOrchestrator {
    engine: MetricsEngine,
    tests: Vec<Box<dyn RobustnessTest>>,
}

impl ValidationOrchestrator {
    /// Orchestrator loaded with the standard edge-input suite
    pub fn new(engine: MetricsEngine) -> Self {
        let tests: Vec<Box<dyn RobustnessTest>> = standard_suite()
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn RobustnessTest>)
            .collect();

        Self { engine, tests }
    }

    pub fn with_tests(engine: MetricsEngine, tests: Vec<Box<dyn RobustnessTest>>) -> Self {
        Self { engine, tests }
    }

    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name()).collect()
    }

    /// Run every case; a case that errors becomes a failed result, never an abort.
    pub fn run_robustness_report(&self, suite_id: String) -> RobustnessReport {
        let mut test_results = Vec::with_capacity(self.tests.len());

        for test in &self.tests {
            log::debug!("Running test: {} ({})", test.name(), test.description());
            let started = Instant::now();
            let mut result = match test.run(&self.engine) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("Robustness case {} failed: {}", test.name(), e);
                    TestResult::from_error(test.name(), &e)
                }
            };
            result.execution_ms = started.elapsed().as_secs_f64() * 1000.0;
            test_results.push(result);
        }

        let total = test_results.len();
        let passed = test_results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        let (pass_rate, overall_score, average_time_ms) = if total > 0 {
            (
                passed as f64 / total as f64,
                test_results.iter().map(|r| r.score).sum::<f64>() / total as f64,
                test_results.iter().map(|r| r.execution_ms).sum::<f64>() / total as f64,
            )
        } else {
            (0.0, 0.0, 0.0)
        };
        let passed_all = failed == 0;

        let summary = if passed_all {
            format!(
                "All {} robustness tests passed with overall score {:.1}%",
                total,
                overall_score * 100.0
            )
        } else {
            let failed_names: Vec<&str> = test_results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| r.test_name.as_str())
                .collect();
            format!(
                "{} of {} robustness tests failed ({}). Pass rate: {:.1}%",
                failed,
                total,
                failed_names.join(", "),
                pass_rate * 100.0
            )
        };

        log::info!("{}", summary);

        RobustnessReport {
            suite_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            test_results,
            total,
            passed,
            failed,
            pass_rate,
            overall_score,
            passed_all,
            average_time_ms,
            summary,
        }
    }
}
