use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use bstats_common::{any_to_string, format_fixed};
use bstats_model::{ColumnTag, FieldValue, Outcome, ReportRow, ReportTable};

use crate::types::{ColumnOverview, ProfileReport};

/// Decimals shown for statistics.
const DECIMALS: usize = 4;

pub fn print_report(report: &ProfileReport) {
    println!("Source: {}", report.source.display());
    match &report.rows {
        Outcome::Ok(rows) => println!("Rows: {rows}"),
        Outcome::Empty(reason) => println!("Rows: - ({reason})"),
    }
    println!("{}", overview_table(&report.columns));
    print_section("Descriptive statistics", &report.describe);
    print_section("Skewness", &report.skewness);
    print_section("Kurtosis", &report.kurtosis);
    print_section("Normality (continuous columns)", &report.normality);
    match &report.sample {
        Some(Outcome::Ok(sample)) => {
            println!();
            println!("Sample:");
            println!("{}", frame_table(sample));
        }
        Some(Outcome::Empty(reason)) => {
            println!();
            println!("Sample: {reason}");
        }
        None => {}
    }
}

/// One row per column: type, unique count, tags and missing markers.
pub fn overview_table(columns: &[ColumnOverview]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Unique"),
        header_cell("Tags"),
        header_cell("Missing marker"),
        header_cell("Missing cells"),
    ]);
    apply_overview_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    for column in columns {
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(column.element_type),
            Cell::new(column.unique_count),
            tags_cell(&column.tags),
            flag_cell(column.has_missing_marker, Color::Yellow),
            count_cell(column.missing_cells),
        ]);
    }
    table
}

/// Lays a report table out with one header per field.
pub fn report_table<R: ReportRow>(report: &ReportTable<R>) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("column")];
    header.extend(report.fields().iter().map(|field| header_cell(field)));
    table.set_header(header);
    apply_table_style(&mut table);
    for (column, values) in report.rows() {
        let mut row = vec![Cell::new(column).add_attribute(Attribute::Bold)];
        row.extend(values.iter().map(field_cell));
        table.add_row(row);
    }
    for index in 1..=report.fields().len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

/// Renders a frame cell by cell.
pub fn frame_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names_str()
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..df.height() {
        let row: Vec<Cell> = df
            .get_columns()
            .iter()
            .map(|column| match column.get(idx) {
                Ok(value) => Cell::new(any_to_string(value)),
                Err(_) => dim_cell("-"),
            })
            .collect();
        table.add_row(row);
    }
    table
}

fn print_section<R: ReportRow>(title: &str, outcome: &Outcome<ReportTable<R>>) {
    println!();
    match outcome {
        Outcome::Ok(report) => {
            println!("{title}:");
            println!("{}", report_table(report));
        }
        Outcome::Empty(reason) => println!("{title}: {reason}"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_overview_style(table: &mut Table) {
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

fn field_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Float(Some(v)) => Cell::new(format_fixed(*v, DECIMALS)),
        FieldValue::Float(None) => dim_cell("-"),
        FieldValue::Count(v) => Cell::new(v),
        FieldValue::Flag(v) => flag_cell(*v, Color::Red),
        FieldValue::Text(v) => Cell::new(v),
    }
}

fn tags_cell(tags: &[ColumnTag]) -> Cell {
    if tags.is_empty() {
        return dim_cell("unclassified");
    }
    let label = tags
        .iter()
        .map(ColumnTag::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Cell::new(label).fg(Color::Green)
}

fn flag_cell(flag: bool, color: Color) -> Cell {
    if flag {
        Cell::new("yes").fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell("no")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
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
