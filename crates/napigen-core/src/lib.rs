//! napigen-core - Schema IR, type mapping and identifier sanitizing
//!
//! This crate provides the foundational types shared by every napigen stage:
//! - [`SchemaIr`] and its schemas, the single intermediate representation
//!   produced by both front ends
//! - [`TypeMapper`] for resolving semantic types across the C++, N-API and
//!   TypeScript surfaces
//! - [`NameSanitizer`] for reserved-word collisions in emitted C++
//! - [`Diagnostics`] returned alongside the IR
//! - [`GeneratorConfig`] loaded from `napigen.toml`

mod config;
mod diagnostics;
mod error;
mod ir;
mod naming;
mod types;

pub use config::{DEFAULT_CONFIG_FILE, GeneratorConfig, Markers, OutputConfig};
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity, SourceLocation};
pub use error::{CoreError, CoreResult};
pub use ir::{ExportSchema, FieldSchema, ParameterSchema, SchemaIr, StructSchema};
pub use naming::{NameSanitizer, SanitizedName};
pub use types::{ParsedType, Resolved, ScalarKind, SemanticType, TypeMapper};

/// Log levels understood by the CLI and the logging crate
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Parse a level name such as `"debug"` (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Diagnostic, DiagnosticCode, Diagnostics, ExportSchema, FieldSchema, GeneratorConfig,
        NameSanitizer, ScalarKind, SchemaIr, SemanticType, Severity, StructSchema, TypeMapper,
    };
}
