use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::FourTrackError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub robustness_weight: f64,
    pub significance_weight: f64,
    pub association_weight: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            robustness_weight: 0.4,
            significance_weight: 0.4,
            association_weight: 0.2,
        }
    }
}

impl ConfigSection for ReportConfig {
    fn section_name() -> &'static str {
        "report"
    }

    fn validate(&self) -> Result<(), FourTrackError> {
        let weights = [
            self.robustness_weight,
            self.significance_weight,
            self.association_weight,
        ];
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(FourTrackError::Configuration(
                "Report weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(FourTrackError::Configuration(
                "At least one report weight must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Report".to_string(),
            fields: vec![
                FieldManifest::new(
                    "robustness_weight",
                    "float",
                    serde_json::json!(0.4),
                    "Weight of the robustness pass rate in the overall score",
                )
                .with_range(Some(0.0), None),
                FieldManifest::new(
                    "significance_weight",
                    "float",
                    serde_json::json!(0.4),
                    "Weight of the significant-result share",
                )
                .with_range(Some(0.0), None),
                FieldManifest::new(
                    "association_weight",
                    "float",
                    serde_json::json!(0.2),
                    "Weight of the mean constant-association score",
                )
                .with_range(Some(0.0), None),
            ],
        }
    }
}
