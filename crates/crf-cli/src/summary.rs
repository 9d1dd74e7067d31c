use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crf_core::naming::field_key;
use crf_model::{FormVersion, IssueSeverity, SchemaReport};

/// Print the schema structure table: one row per question.
pub fn print_schema_table(version: &FormVersion) {
    println!("Version: {}", version.version);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Question"),
        header_cell("Field Key"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Repeatable"),
        header_cell("Condition"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for section in &version.sections {
        for question in &section.questions {
            let kind_cell = match question.kind() {
                Ok(kind) => Cell::new(kind.as_str()),
                Err(_) => Cell::new(format!("{} (?)", question.field_type)).fg(Color::Red),
            };
            let repeatable = question.repeatable || section.repeatable;
            table.add_row(vec![
                Cell::new(&section.title),
                Cell::new(&question.label),
                Cell::new(field_key(&question.label)),
                kind_cell,
                flag_cell(question.required),
                flag_cell(repeatable),
                Cell::new(question.visible_if.clone().unwrap_or_else(|| "-".to_string())),
            ]);
        }
    }
    println!("{table}");
}

/// Print validation issues, errors before warnings.
pub fn print_schema_report(report: &SchemaReport) {
    if report.issues.is_empty() {
        println!("Schema is valid: no issues found.");
        return;
    }
    let mut issues = report.issues.clone();
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.code.cmp(&b.code)
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Section"),
        header_cell("Question"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            Cell::new(issue.section.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(issue.question.clone().unwrap_or_else(|| "-".to_string())),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("-").fg(Color::DarkGrey)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("error")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 2,
        IssueSeverity::Warning => 1,
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
