//! The `normalize` subcommand: fold declarations into canonical definitions

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::pipeline::load_declarations;
use crate::report::definitions_table;

/// Print the canonical, overlap-free definitions for a declarations file
pub fn run_normalize(declarations_path: &Path) -> Result<()> {
    let declarations = load_declarations(declarations_path)?;
    let (ranges, elements) = declarations.normalize()?;

    println!(
        "\n {} Normalized definitions",
        style("◆").cyan().bold()
    );
    println!("   Source: {}", style(declarations_path.display()).dim());
    println!();

    for line in definitions_table(&ranges, &elements).to_string().lines() {
        println!("   {}", line);
    }
    println!();

    Ok(())
}
