//! Run summary tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::PipelineResult;

pub fn print_summary(result: &PipelineResult) {
    match &result.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("Fingerprint: {}", result.fingerprint);
    println!("{}", entity_table(result));
    println!("{}", star_table(result));
}

/// Per-entity load and cleanse counts, with a total row.
pub fn entity_table(result: &PipelineResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Staged"),
        header_cell("Clean"),
        header_cell("Duplicates"),
        header_cell("Historical"),
        header_cell("Repaired"),
        header_cell("Rejected"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut staged = 0usize;
    let mut clean = 0usize;
    let mut rejected = 0usize;
    for summary in &result.entities {
        staged += summary.staged;
        clean += summary.clean;
        rejected += summary.rejected;
        table.add_row(vec![
            Cell::new(summary.entity.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.staged),
            Cell::new(summary.clean),
            count_cell(summary.duplicates_dropped, Color::Yellow),
            count_cell(summary.historical_dropped, Color::Yellow),
            count_cell(summary.repaired, Color::Yellow),
            count_cell(summary.rejected, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(staged).add_attribute(Attribute::Bold),
        Cell::new(clean).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(rejected, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Published table sizes and orphaned sale lines.
pub fn star_table(result: &PipelineResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let counts = result.row_counts;
    table.add_row(vec![Cell::new("dim_customers"), Cell::new(counts.customers)]);
    table.add_row(vec![Cell::new("dim_products"), Cell::new(counts.products)]);
    table.add_row(vec![Cell::new("fact_sales"), Cell::new(counts.sales)]);
    table.add_row(vec![
        dim_cell("orphaned sale lines"),
        count_cell(result.orphan_count, Color::Yellow),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
