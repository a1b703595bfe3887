//! Binmachine: column binning CLI
//!
//! Bins the configured columns of a CSV or Parquet dataset, or normalizes
//! overlapping range declarations into canonical bin definitions.

use anyhow::Result;
use clap::Parser;

use binmachine::cli::{bin::run_bin, normalize::run_normalize, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.command.output_path();

    match &cli.command {
        Commands::Bin {
            input,
            settings,
            no_confirm,
            infer_schema_length,
            ..
        } => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path could not be derived"))?;
            run_bin(input, settings, &output, *no_confirm, *infer_schema_length)
        }
        Commands::Normalize { declarations } => run_normalize(declarations),
    }
}
