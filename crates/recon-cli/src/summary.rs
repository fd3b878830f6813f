use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recon_cli::pipeline::RunResult;
use recon_ingest::column_text;
use recon_model::OutputColumn;

pub fn print_summary(result: &RunResult) {
    println!("Reference: {}", result.reference.display());
    println!("Target: {}", result.target.display());
    if result.written.is_empty() {
        println!("Output: (dry run, nothing written)");
    }
    for path in &result.written {
        println!("Output: {}", path.display());
    }

    let summary = result.output.summary();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Changed"),
        header_cell("Unchanged"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in OutputColumn::MASKED {
        let changed = summary.changed(column);
        table.add_row(vec![
            Cell::new(column.as_str()),
            count_cell(changed, Color::Green),
            dim_cell(summary.total_rows - changed),
        ]);
    }
    table.add_row(vec![
        Cell::new("ROWS")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(summary.rows_with_changes, Color::Green).add_attribute(Attribute::Bold),
        Cell::new(summary.total_rows - summary.rows_with_changes).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let stats = &result.stats;
    println!(
        "Oracle calls: {} ({} failed), {} rows in {} ms",
        stats.oracle_calls,
        stats.oracle_failures,
        stats.rows,
        stats.elapsed.as_millis()
    );
    print_preview(result);
}

/// Prints the preview rows, changed cells in green.
fn print_preview(result: &RunResult) {
    let preview = &result.preview;
    if preview.height() == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        OutputColumn::ALL
            .iter()
            .map(|column| header_cell(column.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..preview.height() {
        let row: Vec<Cell> = OutputColumn::ALL
            .iter()
            .map(|column| {
                let text = column_text(preview, column.as_str(), idx).unwrap_or_default();
                if result.output.is_changed(idx, *column) {
                    Cell::new(text).fg(Color::Green)
                } else {
                    Cell::new(text)
                }
            })
            .collect();
        table.add_row(row);
    }
    println!("Preview (first {} rows):", preview.height());
    println!("{table}");
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
