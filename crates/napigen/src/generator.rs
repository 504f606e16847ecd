//! End-to-end pipeline: extract, validate, render, write.

use napigen_core::{Diagnostics, GeneratorConfig, SchemaIr};
use napigen_emit::{EmitError, Emitter, GeneratedFile};
use napigen_extract::{
    ExtractError, Extraction, LiveMetadata, SourceFile, parse_from_live_annotations,
    parse_from_source,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for generation runs
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation runs
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl GenerateError {
    /// Stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u32 {
        match self {
            GenerateError::Extract(e) => e.error_code(),
            GenerateError::Emit(e) => e.error_code(),
        }
    }

    /// Diagnostics behind a rejected extraction
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            GenerateError::Extract(e) => e.diagnostics(),
            GenerateError::Emit(_) => None,
        }
    }
}

/// Where the schema comes from
#[derive(Debug, Clone)]
pub enum SchemaInput {
    /// Decorated TypeScript source files
    Sources(Vec<SourceFile>),
    /// Metadata recorded by running the decorators
    Live(LiveMetadata),
}

/// Summary of one generation run
#[derive(Debug)]
pub struct GenerationReport {
    pub ir: SchemaIr,
    /// Extraction warnings followed by write warnings
    pub diagnostics: Diagnostics,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct Generator {
    config: GeneratorConfig,
    emitter: Emitter,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        let emitter = Emitter::new(config.output.clone());
        Self { config, emitter }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the IR, keeping every diagnostic including errors
    pub fn extract(&self, input: &SchemaInput) -> GenerateResult<Extraction> {
        let extraction = match input {
            SchemaInput::Sources(files) => parse_from_source(files, &self.config.markers)?,
            SchemaInput::Live(metadata) => parse_from_live_annotations(metadata, &self.config.markers),
        };
        tracing::debug!(
            "extracted {} struct(s), {} export(s), {} diagnostic(s)",
            extraction.ir.structs.len(),
            extraction.ir.exports.len(),
            extraction.diagnostics.len()
        );
        Ok(extraction)
    }

    /// Render without writing; fails when extraction reported errors
    pub fn render(&self, input: &SchemaInput) -> GenerateResult<(Extraction, Vec<GeneratedFile>)> {
        let extraction = self.extract(input)?.into_result()?;
        let files = self.emitter.render(&extraction.ir)?;
        Ok((extraction, files))
    }

    /// Run the whole pipeline into `out_dir`.
    ///
    /// Nothing is written when extraction reported an error.
    pub fn generate(&self, input: &SchemaInput, out_dir: &Path) -> GenerateResult<GenerationReport> {
        let extraction = self.extract(input)?.into_result()?;
        let write = self.emitter.emit(&extraction.ir, out_dir)?;

        let mut diagnostics = extraction.diagnostics;
        diagnostics.extend(write.diagnostics);
        tracing::info!(
            "generated {} file(s) into {} ({} warning(s))",
            write.written.len(),
            out_dir.display(),
            diagnostics.len()
        );

        Ok(GenerationReport {
            ir: extraction.ir,
            diagnostics,
            written: write.written,
            skipped: write.skipped,
        })
    }
}
