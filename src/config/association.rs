use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::FourTrackError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationConfig {
    pub window_size: usize,
    pub constants: Vec<String>,
    /// Directory searched for constants that are not built in
    pub constants_dir: Option<PathBuf>,
    pub max_constant_digits: usize,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            window_size: 4,
            constants: vec!["pi".to_string(), "phi".to_string(), "e".to_string()],
            constants_dir: None,
            max_constant_digits: 10_000,
        }
    }
}

impl ConfigSection for AssociationConfig {
    fn section_name() -> &'static str {
        "association"
    }

    fn validate(&self) -> Result<(), FourTrackError> {
        if self.window_size == 0 {
            return Err(FourTrackError::Configuration(
                "Association window size must be at least 1".to_string(),
            ));
        }
        if self.max_constant_digits == 0 {
            return Err(FourTrackError::Configuration(
                "Maximum constant digits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Constant association".to_string(),
            fields: vec![
                FieldManifest::new(
                    "window_size",
                    "integer",
                    serde_json::json!(4),
                    "Sliding window length for exact-match scanning",
                )
                .with_range(Some(1.0), None),
                FieldManifest::new(
                    "constants",
                    "list(string)",
                    serde_json::json!(["pi", "phi", "e"]),
                    "Constants each sequence is scanned against",
                ),
                FieldManifest::new(
                    "constants_dir",
                    "path?",
                    serde_json::Value::Null,
                    "Directory holding <name>.txt digit files",
                ),
                FieldManifest::new(
                    "max_constant_digits",
                    "integer",
                    serde_json::json!(10_000),
                    "Digits read from a constant file",
                )
                .with_range(Some(1.0), None),
            ],
        }
    }
}
