//! `napigen generate` - write every generated file into an output directory

use crate::SchemaArgs;
use crate::inputs::{load_generator, load_schema_input};
use anyhow::Result;
use napigen::GenerationReport;
use std::path::Path;

pub fn run(args: &SchemaArgs, output: &Path) -> Result<()> {
    let generator = load_generator(args)?;
    let input = load_schema_input(args)?;

    let report = match generator.generate(&input, output) {
        Ok(report) => report,
        Err(err) => {
            if let Some(diagnostics) = err.diagnostics() {
                diagnostics.log();
            }
            return Err(err.into());
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &GenerationReport) {
    report.diagnostics.log();
    println!(
        "✓ Schema: {} struct(s), {} export(s)",
        report.ir.structs.len(),
        report.ir.exports.len()
    );
    for path in &report.written {
        println!("✓ Wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("- Kept {} (hand-editable)", path.display());
    }
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
