//! # Sim Error Types

use thiserror::Error;
use thornwall_core::CoreError;

/// Errors that can occur in the sim layer.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text was not valid TOML.
    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A core operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for sim operations.
pub type SimResult<T> = Result<T, SimError>;
