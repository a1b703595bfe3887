//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::default_output_path;

/// Binmachine - Bin numerical and categorical columns into named groups
#[derive(Parser, Debug)]
#[command(name = "binmachine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bin every configured column of a dataset
    Bin {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file with one settings object per column to bin
        #[arg(short, long)]
        settings: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to input directory with '_binned' suffix (e.g., data.csv → data_binned.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the overwrite confirmation prompt
        #[arg(long, default_value = "false")]
        no_confirm: bool,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan (very slow for large files).
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Merge overlapping range/element declarations into canonical definitions
    Normalize {
        /// JSON file with "numeric" and "categorical" declaration lists
        #[arg(short, long)]
        declarations: PathBuf,
    },
}

impl Commands {
    /// Output path of the `bin` command, deriving it from the input when not given
    pub fn output_path(&self) -> Option<PathBuf> {
        match self {
            Commands::Bin { input, output, .. } => {
                Some(output.clone().unwrap_or_else(|| default_output_path(input)))
            }
            Commands::Normalize { .. } => None,
        }
    }
}
