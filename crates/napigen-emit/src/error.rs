//! Error types for rendering and writing generated files

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for emission
pub type EmitResult<T> = Result<T, EmitError>;

/// Error type for emission
#[derive(Error, Debug)]
pub enum EmitError {
    /// A renderer failed to format its output
    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// Output directory or temporary file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A finished temporary file could not replace its target
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An IR type names a struct the IR does not contain
    #[error("'{referenced_by}' references unknown struct '{name}'")]
    UnknownStruct { name: String, referenced_by: String },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmitError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u32 {
        match self {
            EmitError::Format(_) => 8,
            EmitError::Io { .. } => 1,
            EmitError::Persist { .. } => 1,
            EmitError::UnknownStruct { .. } => 9,
        }
    }
}
