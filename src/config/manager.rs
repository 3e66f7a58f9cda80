use super::{
    analysis::AnalysisConfig,
    association::AssociationConfig,
    null_model::NullModelConfig,
    report::ReportConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::FourTrackError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `FOURTRACK__NULL_MODEL__TRIALS=200`
pub const ENV_PREFIX: &str = "FOURTRACK";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub null_model: NullModelConfig,
    pub association: AssociationConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FourTrackError> {
        check_section(&self.analysis)?;
        check_section(&self.null_model)?;
        check_section(&self.association)?;
        check_section(&self.report)?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.analysis.to_manifest(),
            self.null_model.to_manifest(),
            self.association.to_manifest(),
            self.report.to_manifest(),
        ]
    }
}

/// Validate one section, naming it in configuration errors
fn check_section<S: ConfigSection>(section: &S) -> Result<(), FourTrackError> {
    section.validate().map_err(|e| match e {
        FourTrackError::Configuration(msg) => {
            FourTrackError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file (when given) layered under environment overrides.
    pub fn load(&self, path: Option<&Path>) -> Result<(), FourTrackError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(FourTrackError::FileNotFound(path.to_path_buf()));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| FourTrackError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        log::debug!("Loaded configuration: {:?}", config);
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FourTrackError> {
        self.load(Some(path.as_ref()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FourTrackError> {
        let toml_str = self.to_toml()?;

        std::fs::write(path, toml_str)
            .map_err(|e| FourTrackError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, FourTrackError> {
        let config = self.get();
        toml::to_string_pretty(&config)
            .map_err(|e| FourTrackError::Configuration(format!("Failed to serialize: {}", e)))
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Apply a change and keep it only if the result still validates.
    pub fn update<F>(&self, f: F) -> Result<(), FourTrackError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
