//! `napigen check` - extract the schema and report diagnostics

use crate::SchemaArgs;
use crate::inputs::{load_generator, load_schema_input};
use anyhow::Result;

pub fn run(args: &SchemaArgs) -> Result<()> {
    let generator = load_generator(args)?;
    let input = load_schema_input(args)?;
    let extraction = generator.extract(&input)?;

    extraction.diagnostics.log();
    if extraction.has_errors() {
        anyhow::bail!(
            "Schema has {} error(s)",
            extraction.diagnostics.error_count()
        );
    }

    println!("✓ Structs: {}", extraction.ir.structs.len());
    println!("✓ Exports: {}", extraction.ir.exports.len());
    println!("\nSchema is valid!");
    Ok(())
}
