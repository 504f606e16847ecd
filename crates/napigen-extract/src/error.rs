//! Error types for schema extraction

use napigen_core::Diagnostics;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Error type for schema extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Source file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TypeScript grammar could not be loaded
    #[error("tree-sitter init: {0}")]
    Grammar(String),

    /// Source text is not valid TypeScript
    #[error("{file}:{line}:{column}: syntax error near '{snippet}'")]
    Syntax {
        file: String,
        line: usize,
        column: usize,
        snippet: String,
    },

    /// Live annotation metadata is not valid JSON of the expected shape
    #[error("invalid annotation metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Extraction produced error diagnostics
    #[error("schema extraction failed with {error_count} error(s)")]
    Rejected {
        error_count: usize,
        diagnostics: Diagnostics,
    },
}

impl ExtractError {
    /// Stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u32 {
        match self {
            ExtractError::Io { .. } => 1,
            ExtractError::Grammar(_) => 5,
            ExtractError::Syntax { .. } => 6,
            ExtractError::Metadata(_) => 4,
            ExtractError::Rejected { .. } => 7,
        }
    }

    /// Diagnostics carried by a rejected extraction
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            ExtractError::Rejected { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}
