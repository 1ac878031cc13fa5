//! Error types for vdot_app

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up or exporting a stage
#[derive(Error, Debug)]
pub enum VdotError {
    /// Failed to read a config file
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a stage
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Config parsed but holds values the stage cannot run with
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Failed to write an exported frame
    #[error("Frame export failed: {0}")]
    Export(#[from] std::io::Error),
}

/// Result type for vdot_app operations
pub type Result<T> = std::result::Result<T, VdotError>;
