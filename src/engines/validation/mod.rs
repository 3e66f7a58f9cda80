pub mod orchestrator;
pub mod robustness;

pub use orchestrator::{RobustnessReport, ValidationOrchestrator};
pub use robustness::{standard_suite, EdgeInputTest, RobustnessTest, TestResult};
