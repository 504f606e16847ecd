//! Error types for napigen core operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for configuration and IR loading
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reading a file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `napigen.toml` is not valid TOML or has the wrong shape
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IR or metadata JSON could not be (de)serialized
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u32 {
        match self {
            CoreError::Io { .. } => 1,
            CoreError::ConfigParse(_) => 2,
            CoreError::InvalidConfig(_) => 3,
            CoreError::Json(_) => 4,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
