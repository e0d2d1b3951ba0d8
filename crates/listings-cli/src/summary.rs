use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use listings_model::StratumLevel;
use listings_transform::DistributionSummary;
use listings_transform::normalization::UNKNOWN_DISTRICT;

use crate::types::CleanResult;

pub fn print_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    for path in [&result.outputs.with_indicator, &result.outputs.plain]
        .into_iter()
        .flatten()
    {
        println!("  {}", path.display());
    }

    print_rows_table(result);
    print_imputation_table(result);
    print_area_table(result);
    print_district_table(result);
    print_null_table(result);
}

fn print_rows_table(result: &CleanResult) {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Raw export"), Cell::new(result.raw_rows)]);
    table.add_row(vec![Cell::new("Sampled"), Cell::new(result.sampled_rows)]);
    table.add_row(vec![
        Cell::new("Dropped (price)"),
        count_cell(report.price.dropped, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Output")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_imputation_table(result: &CleanResult) {
    let imputation = &result.report.imputation;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stratum level"),
        header_cell("Imputed"),
        header_cell("Groups"),
        header_cell("Supported"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    for level in StratumLevel::FALLBACK_ORDER {
        let imputed = imputation.level_counts.get(&level).copied().unwrap_or(0);
        let coverage = imputation
            .coverage
            .iter()
            .find(|coverage| coverage.level == level);
        table.add_row(vec![
            Cell::new(level.as_str()),
            count_cell(imputed, Color::Green),
            coverage.map_or_else(|| dim_cell("-"), |c| Cell::new(c.groups)),
            coverage.map_or_else(|| dim_cell("-"), |c| Cell::new(c.supported_groups)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(imputation.missing).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_area_table(result: &CleanResult) {
    let area = &result.report.area;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("square_meters"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (label, summary) in [
        ("Observed", area.observed),
        ("Imputed", area.imputed),
        ("All", area.all),
    ] {
        table.add_row(distribution_row(label, summary.as_ref()));
    }
    println!("{table}");
}

fn distribution_row(label: &str, summary: Option<&DistributionSummary>) -> Vec<Cell> {
    let mut row = vec![Cell::new(label)];
    match summary {
        Some(summary) => {
            row.push(Cell::new(summary.count));
            row.push(Cell::new(format!("{:.2}", summary.mean)));
            row.push(summary.std.map_or_else(
                || dim_cell("-"),
                |std| Cell::new(format!("{std:.2}")),
            ));
            row.push(Cell::new(format!("{:.2}", summary.min)));
            row.push(Cell::new(format!("{:.2}", summary.max)));
        }
        None => {
            row.push(Cell::new(0));
            row.extend((0..4).map(|_| dim_cell("-")));
        }
    }
    row
}

fn print_district_table(result: &CleanResult) {
    let districts = &result.report.districts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("District"), header_cell("Listings")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let mut counts: Vec<(&String, &usize)> = districts.counts.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (label, count) in counts {
        let cell = if districts.unrecognized.contains(label) || label == UNKNOWN_DISTRICT {
            Cell::new(label).fg(Color::DarkGrey)
        } else {
            Cell::new(label)
        };
        table.add_row(vec![cell, Cell::new(count)]);
    }
    println!("{table}");
}

fn print_null_table(result: &CleanResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Nulls")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, nulls) in &result.report.null_counts {
        table.add_row(vec![Cell::new(name), count_cell(*nulls, Color::Yellow)]);
    }
    println!("{table}");
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
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Zero counts are dimmed; others take `color`.
fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
