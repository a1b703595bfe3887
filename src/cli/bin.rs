//! The `bin` subcommand: load a dataset, bin its configured columns, save it

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use super::prompts::confirm_overwrite;
use crate::pipeline::{bin_dataframe_with_progress, find_settings, load_dataset, load_settings, save_dataset};
use crate::report::BinningSummary;
use crate::utils::{
    create_column_progress_bar, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_success, print_warning,
};

/// Run the whole-table binning pipeline
pub fn run_bin(
    input: &Path,
    settings_path: &Path,
    output: &Path,
    no_confirm: bool,
    infer_schema_length: usize,
) -> Result<()> {
    let settings = load_settings(settings_path)?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, settings_path, output, settings.len());

    if output.exists() && !no_confirm && !confirm_overwrite(output)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(input, infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    let (rows, cols) = df.shape();
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      {}", style(format!("{:.2?}", step_start.elapsed())).dim());

    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for s in &settings {
        if !column_names.contains(&s.column) {
            print_warning(&format!("Settings for '{}' match no column; skipped", s.column));
        }
    }

    // Step 2: Bin configured columns
    print_step_header(2, "Bin Columns");
    let step_start = Instant::now();
    let configured = column_names
        .iter()
        .filter(|name| find_settings(&settings, name).is_some())
        .count();
    if configured == 0 {
        print_info("No column has binning settings; output equals input");
    }
    let pb = create_column_progress_bar(configured as u64);
    let (mut binned, outcomes) = bin_dataframe_with_progress(&df, &settings, &pb)
        .with_context(|| format!("Failed to bin dataset: {}", input.display()))?;
    pb.finish_and_clear();
    print_success(&format!("Binned {} column(s)", outcomes.len()));
    println!("      {}", style(format!("{:.2?}", step_start.elapsed())).dim());

    // Step 3: Save output
    print_step_header(3, "Save Results");
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut binned, output)?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));

    let summary = BinningSummary::new(rows, cols, outcomes);
    summary.display();

    let partial = summary.columns_with_unassigned();
    if !partial.is_empty() {
        println!();
        print_info(&format!(
            "Rows without a bin in: {}",
            style(partial.join(", ")).yellow()
        ));
    }

    print_completion();
    Ok(())
}
