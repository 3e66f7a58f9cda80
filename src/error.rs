use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FourTrackError {
    #[error("Invalid symbol '{symbol}' at position {position} (allowed: {allowed})")]
    InvalidSymbol {
        symbol: char,
        position: usize,
        allowed: String,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FourTrackError {
    /// Validation failures are recorded per sequence; everything else ends the command.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSymbol { .. })
    }
}

pub type Result<T> = std::result::Result<T, FourTrackError>;
