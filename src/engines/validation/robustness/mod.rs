pub mod base;
pub mod edge_input;

pub use base::{RobustnessTest, TestResult};
pub use edge_input::{standard_suite, EdgeInputTest};
