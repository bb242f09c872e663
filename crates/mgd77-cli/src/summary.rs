//! Terminal tables for header listings and verification summaries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mgd77_core::HeaderParams;
use mgd77_verify::VerificationReport;

/// Header items as a three-column table: number, name, value. Only the
/// items in `wanted` are listed when given.
#[must_use]
pub fn header_table(params: &HeaderParams, wanted: Option<&[usize]>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Item"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, (name, value)) in params.iter().enumerate() {
        if wanted.is_some_and(|w| !w.contains(&index)) {
            continue;
        }
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(index + 1), Cell::new(name), value_cell]);
    }
    table
}

/// One row per verified cruise plus a total row.
#[must_use]
pub fn verification_table(reports: &[VerificationReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cruise"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total_errors = 0;
    let mut total_warnings = 0;
    for report in reports {
        total_errors += report.errors;
        total_warnings += report.warnings;
        table.add_row(vec![
            Cell::new(&report.ngdc_id),
            count_cell(report.errors, Color::Red),
            count_cell(report.warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(total_errors, Color::Red),
        count_cell(total_warnings, Color::Yellow),
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
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgd77_core::params::item;

    #[test]
    fn test_header_table_selects_items() {
        let mut params = HeaderParams::default();
        params.set(item::SURVEY_IDENTIFIER, "TEST0001");
        let wanted = [item::SURVEY_IDENTIFIER, item::FORMAT_ACRONYM];
        let mut table = header_table(&params, Some(wanted.as_slice()));
        table.force_no_tty();
        let text = table.to_string();
        assert_eq!(table.row_count(), 2);
        assert!(text.contains("TEST0001"));
        assert!(text.contains("Survey_Identifier"));
    }

    #[test]
    fn test_verification_table_totals() {
        let mut a = VerificationReport::new("01010047");
        a.errors = 2;
        let mut b = VerificationReport::new("01010048");
        b.warnings = 3;
        let mut table = verification_table(&[a, b]);
        table.force_no_tty();
        assert_eq!(table.row_count(), 3);
        let text = table.to_string();
        assert!(text.contains("TOTAL"));
        assert!(text.contains("01010048"));
    }
}
