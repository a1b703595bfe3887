//! Binning summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::BinningOutcome;

/// Summary of a whole-table binning run
#[derive(Debug, Default)]
pub struct BinningSummary {
    pub rows: usize,
    pub input_columns: usize,
    pub outcomes: Vec<BinningOutcome>,
}

impl BinningSummary {
    pub fn new(rows: usize, input_columns: usize, outcomes: Vec<BinningOutcome>) -> Self {
        Self {
            rows,
            input_columns,
            outcomes,
        }
    }

    /// Configured columns that left at least one row without a bin
    pub fn columns_with_unassigned(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.unassigned > 0)
            .map(|o| o.column.as_str())
            .collect()
    }

    /// Render the per-column table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Output").add_attribute(Attribute::Bold),
            Cell::new("Strategy").add_attribute(Attribute::Bold),
            Cell::new("Bins").add_attribute(Attribute::Bold),
            Cell::new("Unassigned").add_attribute(Attribute::Bold),
        ]);

        for outcome in &self.outcomes {
            table.add_row(vec![
                Cell::new(&outcome.column),
                Cell::new(&outcome.output_column).fg(Color::Cyan),
                Cell::new(&outcome.strategy),
                Cell::new(outcome.bin_count),
                Cell::new(outcome.unassigned).fg(if outcome.unassigned == 0 {
                    Color::Green
                } else {
                    Color::Yellow
                }),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("BINNING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!(
            "      {} rows, {} input columns, {} binned",
            style(self.rows).yellow(),
            style(self.input_columns).yellow(),
            style(self.outcomes.len()).yellow().bold()
        );
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}
