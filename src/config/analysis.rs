use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::FourTrackError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of leading codes shown in report previews
    pub preview_len: usize,
    pub window_size: usize,
    pub window_step: usize,
    /// Share of digits and '.' above which auto-detection picks digits
    pub digits_detect_ratio: f64,
    pub detect_sample_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            preview_len: 20,
            window_size: 12,
            window_step: 5,
            digits_detect_ratio: 0.5,
            detect_sample_len: 100,
        }
    }
}

impl ConfigSection for AnalysisConfig {
    fn section_name() -> &'static str {
        "analysis"
    }

    fn validate(&self) -> Result<(), FourTrackError> {
        if self.window_size == 0 || self.window_size % 4 != 0 {
            return Err(FourTrackError::Configuration(
                "Track 1 window size must be a positive multiple of 4".to_string(),
            ));
        }
        if self.window_step == 0 {
            return Err(FourTrackError::Configuration(
                "Track 1 window step must be at least 1".to_string(),
            ));
        }
        if self.digits_detect_ratio < 0.0 || self.digits_detect_ratio >= 1.0 {
            return Err(FourTrackError::Configuration(
                "Digit detection ratio must be in [0, 1)".to_string(),
            ));
        }
        if self.detect_sample_len == 0 {
            return Err(FourTrackError::Configuration(
                "Detection sample length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Analysis".to_string(),
            fields: vec![
                FieldManifest::new(
                    "preview_len",
                    "integer",
                    serde_json::json!(20),
                    "Leading codes shown in report previews",
                )
                .with_range(Some(0.0), None),
                FieldManifest::new(
                    "window_size",
                    "integer",
                    serde_json::json!(12),
                    "Track 1 window length (split into four equal parts)",
                )
                .with_range(Some(4.0), None),
                FieldManifest::new(
                    "window_step",
                    "integer",
                    serde_json::json!(5),
                    "Track 1 window step",
                )
                .with_range(Some(1.0), None),
                FieldManifest::new(
                    "digits_detect_ratio",
                    "float",
                    serde_json::json!(0.5),
                    "Digit and '.' share above which a file is read as digits",
                )
                .with_range(Some(0.0), Some(1.0)),
                FieldManifest::new(
                    "detect_sample_len",
                    "integer",
                    serde_json::json!(100),
                    "Characters sampled for alphabet detection",
                )
                .with_range(Some(1.0), None),
            ],
        }
    }
}
