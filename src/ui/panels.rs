use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Selection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let location_options = state.location_options.clone();
    let industry_options = state.industry_options.clone();

    ui.strong("Select city");
    if let Some(choice) = selection_combo(ui, "select_city", &state.location, &location_options) {
        state.set_location(choice);
    }
    ui.add_space(8.0);

    ui.strong("Select industry");
    if let Some(choice) = selection_combo(ui, "select_industry", &state.industry, &industry_options) {
        state.set_industry(choice);
    }
    ui.add_space(8.0);

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

/// A dropdown over `options`; returns the newly clicked choice, if any.
fn selection_combo(
    ui: &mut Ui,
    id: &str,
    current: &Selection,
    options: &[Selection],
) -> Option<Selection> {
    let mut chosen = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                if ui
                    .selectable_label(current == opt, opt.to_string())
                    .clicked()
                {
                    chosen = Some(opt.clone());
                }
            }
        });
    chosen
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(view)) = (&state.table, &state.view) {
            ui.label(format!(
                "{} startups loaded, {} shown",
                table.len(),
                view.filtered.len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open startup table")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_and_report(&path);
    }
}
