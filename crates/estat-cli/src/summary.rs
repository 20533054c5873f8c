use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use estat_model::{AgeRule, DatasetProfile, ValueRule, YearRule};

use crate::commands::RunResult;

/// Number of output rows echoed when no output file was requested.
const PREVIEW_ROWS: usize = 10;

pub fn print_run_summary(result: &RunResult) {
    println!("Profile: {}", result.profile.name);
    println!("Source: {}", result.source);
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Raw rows"), Cell::new(stats.raw_rows)]);
    table.add_row(vec![
        Cell::new("Period columns"),
        Cell::new(stats.year_columns),
    ]);
    table.add_row(vec![Cell::new("Expanded"), Cell::new(stats.expanded_rows)]);
    table.add_row(vec![
        Cell::new("Dropped (uncleanable)"),
        count_cell(stats.dropped_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Filtered (age)"),
        count_cell(stats.filtered_rows, Color::DarkGrey),
    ]);
    if let Some(removed) = result.iso3_removed {
        table.add_row(vec![
            Cell::new("Removed (aggregate/unmapped)"),
            count_cell(removed, Color::DarkGrey),
        ]);
    }
    table.add_row(vec![
        Cell::new("OUTPUT")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.frame.height()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if result.output.is_none() {
        println!("{}", result.frame.head(Some(PREVIEW_ROWS)));
    }
}

pub fn print_profiles(profiles: &[DatasetProfile]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Description"),
        header_cell("Dimensions"),
        header_cell("Year"),
        header_cell("Value"),
        header_cell("Age"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles {
        let age = match profile.age_filter {
            Some(age) => format!("{} (= {age})", age_rule_label(profile.age_rule)),
            None => age_rule_label(profile.age_rule).to_string(),
        };
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(&profile.description),
            Cell::new(profile.dimensions.join(", ")),
            Cell::new(year_rule_label(profile.year_rule)),
            Cell::new(value_rule_label(profile.value_rule)),
            Cell::new(age),
            dim_cell(profile.output_columns().join(", ")),
        ]);
    }
    println!("{table}");
}

fn year_rule_label(rule: YearRule) -> &'static str {
    match rule {
        YearRule::StripSpaces => "strip spaces",
        YearRule::FirstFourDigits => "first 4 digits",
    }
}

fn value_rule_label(rule: ValueRule) -> &'static str {
    match rule {
        ValueRule::StripNonNumeric => "strip non-numeric",
        ValueRule::FirstNumber => "first number",
    }
}

fn age_rule_label(rule: AgeRule) -> &'static str {
    match rule {
        AgeRule::Keep => "raw code",
        AgeRule::Digits => "digits",
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
