//! Canonical definition listing for normalized declarations

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};

use crate::pipeline::{format_elements, format_ranges, ColumnElementDef, ColumnRangeDef};

/// Render normalized range and element definitions, one row per column
pub fn definitions_table(ranges: &[ColumnRangeDef], elements: &[ColumnElementDef]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Definition").add_attribute(Attribute::Bold),
    ]);

    for def in ranges {
        table.add_row(vec![
            Cell::new(&def.column),
            Cell::new("numerical").fg(Color::Cyan),
            Cell::new(format_ranges(&def.ranges)),
        ]);
    }
    for def in elements {
        table.add_row(vec![
            Cell::new(&def.column),
            Cell::new("categorical").fg(Color::Magenta),
            Cell::new(format_elements(&def.elements)),
        ]);
    }

    table
}
