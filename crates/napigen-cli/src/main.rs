//! napigen CLI - Generate N-API bindings from decorated TypeScript
//!
//! Commands:
//! - `napigen generate` - Write the C++ bridge, structs, facade and stub
//! - `napigen check` - Extract the schema and report diagnostics
//! - `napigen ir` - Dump the schema IR as JSON

use clap::{Args, Parser, Subcommand};
use napigen::{GenerateError, LogLevel};
use std::path::PathBuf;

mod check;
mod generate;
mod inputs;
mod ir;

#[derive(Parser)]
#[command(name = "napigen")]
#[command(author, version, about = "Generate N-API bindings from decorated TypeScript", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the schema is read from
#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// TypeScript source files or glob patterns
    #[arg(short, long = "input", required_unless_present = "metadata", num_args = 1..)]
    pub inputs: Vec<String>,

    /// Decorator metadata JSON recorded at run time, used instead of sources
    #[arg(long, conflicts_with = "inputs")]
    pub metadata: Option<PathBuf>,

    /// Path to napigen.toml (default: ./napigen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings into an output directory
    Generate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Output directory for generated files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract the schema and report diagnostics without writing files
    Check {
        #[command(flatten)]
        schema: SchemaArgs,
    },

    /// Print the schema IR as JSON
    Ir {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_level(name: &str) -> Result<LogLevel, String> {
    LogLevel::parse(name).ok_or_else(|| format!("unknown log level '{name}'"))
}

/// Explicit `--log-level` wins over `-v`
fn effective_level(verbose: u8, explicit: Option<LogLevel>) -> LogLevel {
    explicit.unwrap_or(match verbose {
        0 => LogLevel::Info,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    })
}

fn main() {
    let cli = Cli::parse();
    napigen_logging::init_logging(effective_level(cli.verbose, cli.log_level));

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate { schema, output } => generate::run(&schema, &output),
        Commands::Check { schema } => check::run(&schema),
        Commands::Ir { schema, output } => ir::run(&schema, output.as_deref()),
    }
}

/// Generator failures exit with their error code, anything else with 1
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GenerateError>()
        .and_then(|e| i32::try_from(e.error_code()).ok())
        .unwrap_or(1)
}
