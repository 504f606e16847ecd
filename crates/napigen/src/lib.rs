//! # napigen
//!
//! Generate Node.js native addon bindings from decorated TypeScript.
//!
//! napigen reads TypeScript classes marked `@Struct()` and static methods
//! marked `@Export()` / `@AsyncExport()`, builds one schema IR, and emits:
//! - C++ value structs with `FromNapi` / `ToNapi` marshallers
//! - an N-API bridge with sync wrappers and `AsyncWorker`-based async wrappers
//! - a typed TypeScript facade hiding the boundary
//! - an implementation stub written once and then owned by you
//!
//! ## Quick Start
//!
//! ```ignore
//! use napigen::prelude::*;
//!
//! let generator = Generator::new(GeneratorConfig::default());
//! let input = SchemaInput::Sources(vec![SourceFile::read("src/solver.ts")?]);
//! let report = generator.generate(&input, Path::new("native"))?;
//! report.diagnostics.log();
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`napigen_core`] - IR, type mapping, naming, diagnostics, configuration
//! - [`napigen_extract`] - TypeScript source and live-annotation front ends
//! - [`napigen_emit`] - C++ and TypeScript renderers and the output writer
//! - [`napigen_runtime`] - in-process reference bridge for exercising a schema

mod generator;

pub use generator::{GenerateError, GenerateResult, GenerationReport, Generator, SchemaInput};

pub use napigen_core::{
    DEFAULT_CONFIG_FILE, Diagnostic, DiagnosticCode, Diagnostics, ExportSchema, FieldSchema,
    GeneratorConfig, LogLevel, Markers, NameSanitizer, OutputConfig, ScalarKind, SchemaIr,
    SemanticType, Severity, SourceLocation, StructSchema, TypeMapper,
};
pub use napigen_emit::{Emitter, GeneratedFile, OutputWriter, Ownership};
pub use napigen_extract::{
    Extraction, LiveMetadata, SourceFile, parse_from_live_annotations, parse_from_source,
};
pub use napigen_runtime::{
    AsyncRuntime, BridgeError, Completion, NativeValue, ReferenceBridge, StructValue,
};

pub use serde_json;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Diagnostics, GenerateError, Generator, GeneratorConfig, SchemaInput, SchemaIr, SourceFile,
    };
    pub use std::path::Path;
}
