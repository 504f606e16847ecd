//! `napigen ir` - dump the schema IR as JSON

use crate::SchemaArgs;
use crate::inputs::{load_generator, load_schema_input};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(args: &SchemaArgs, output: Option<&Path>) -> Result<()> {
    let generator = load_generator(args)?;
    let input = load_schema_input(args)?;
    let extraction = generator.extract(&input)?;
    extraction.diagnostics.log();

    let json = extraction
        .ir
        .to_json_pretty()
        .context("Failed to serialize schema IR")?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
