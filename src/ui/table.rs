use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::columns::{LAUNCH_YEAR, REVENUE_CAGR, TABLE_COLUMNS};
use crate::data::model::{Table, Value, NULL};

/// Header text and hover help for a source column.
fn header(column: &str) -> (&str, Option<&'static str>) {
    match column {
        LAUNCH_YEAR => ("Launched", Some("The year the company was launched")),
        REVENUE_CAGR => ("Revenue Growth", Some("2-year compound annual growth rate")),
        other => (other, None),
    }
}

/// Cell text for a source column.
fn cell_text(column: &str, value: &Value) -> String {
    match (column, value) {
        (_, Value::Null) => String::new(),
        (LAUNCH_YEAR, v) => v.as_f64().map(|y| format!("{y:.0}")).unwrap_or_else(|| v.to_string()),
        (REVENUE_CAGR, v) => v.as_f64().map(|g| format!("{g:.0}%")).unwrap_or_else(|| v.to_string()),
        (_, v) => v.to_string(),
    }
}

/// Render the filtered startups below the charts.
pub fn startup_table(ui: &mut Ui, table: &Table) {
    let columns: Vec<(&str, Option<usize>)> = TABLE_COLUMNS
        .iter()
        .map(|&c| (c, table.column_index(c).ok()))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), columns.len())
        .header(22.0, |mut header_row| {
            for (name, _) in &columns {
                header_row.col(|ui: &mut Ui| {
                    let (text, help) = header(name);
                    let response = ui.strong(text);
                    if let Some(help) = help {
                        response.on_hover_text(help);
                    }
                });
            }
        })
        .body(|mut body| {
            for rec in &table.rows {
                body.row(20.0, |mut row| {
                    for (name, idx) in &columns {
                        row.col(|ui: &mut Ui| {
                            let value = idx.map(|i| rec.get(i)).unwrap_or(&NULL);
                            ui.label(cell_text(name, value));
                        });
                    }
                });
            }
        });
}
