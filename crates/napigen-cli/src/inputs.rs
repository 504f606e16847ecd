//! Input resolution shared by every command

use crate::SchemaArgs;
use anyhow::{Context, Result};
use napigen::{Generator, GeneratorConfig, LiveMetadata, SchemaInput, SourceFile};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Expand file paths and glob patterns into a sorted, de-duplicated list
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = BTreeSet::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern).with_context(|| format!("Invalid input pattern: {pattern}"))? {
            let path = entry.with_context(|| format!("Failed to read match of {pattern}"))?;
            if path.is_file() {
                paths.insert(path);
                matched = true;
            }
        }
        if !matched {
            anyhow::bail!("No input files match '{pattern}'");
        }
    }
    Ok(paths.into_iter().collect())
}

/// Read the schema input named on the command line
pub fn load_schema_input(args: &SchemaArgs) -> Result<SchemaInput> {
    if let Some(path) = &args.metadata {
        let metadata = LiveMetadata::from_file(path)
            .with_context(|| format!("Failed to load metadata: {}", path.display()))?;
        return Ok(SchemaInput::Live(metadata));
    }

    let files = resolve_inputs(&args.inputs)?
        .into_iter()
        .map(|path| SourceFile::read(&path).with_context(|| format!("Failed to read {}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("read {} source file(s)", files.len());
    Ok(SchemaInput::Sources(files))
}

/// Build a generator from `--config` or the working directory's napigen.toml
pub fn load_generator(args: &SchemaArgs) -> Result<Generator> {
    let config = GeneratorConfig::load_or_default(args.config.as_deref(), Path::new("."))
        .context("Failed to load configuration")?;
    Ok(Generator::new(config))
}
