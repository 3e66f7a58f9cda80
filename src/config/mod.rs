pub mod traits;
pub mod analysis;
pub mod null_model;
pub mod association;
pub mod report;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use analysis::AnalysisConfig;
pub use null_model::{NullModelConfig, PValueMethod, Resampling, MAX_SEED};
pub use association::AssociationConfig;
pub use report::ReportConfig;
pub use traits::{ConfigManifest, ConfigSection, FieldManifest};
