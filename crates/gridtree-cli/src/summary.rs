//! Run summary table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::ConvertResult;

pub fn print_summary(result: &ConvertResult) {
    if let Some(path) = &result.output {
        println!("Export: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Object"),
        header_cell("Groups"),
        header_cell("Attributes"),
        header_cell("Skipped"),
        header_cell("Redefined"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for summary in &result.report.sources {
        table.add_row(vec![
            Cell::new(&summary.source),
            Cell::new(&summary.object_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.groups),
            Cell::new(summary.attributes),
            count_cell(summary.skipped_rows, Color::Yellow),
            count_cell(summary.duplicate_definitions, Color::Yellow),
        ]);
    }
    println!("{table}");

    if !result.report.failures.is_empty() {
        eprintln!("Failed sources:");
        for (source, error) in &result.report.failures {
            eprintln!("- {source}: {error}");
        }
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
