use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StartupDashboardApp {
    pub state: AppState,
}

impl StartupDashboardApp {
    /// Start with the configured data file already open (or its error on screen).
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::default();
        state.open_and_report(&config.data_file);
        Self { state }
    }
}

impl eframe::App for StartupDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scorecards, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    charts::dashboard(ui, &self.state);
                    if let Some(view) = &self.state.view {
                        ui.separator();
                        table::startup_table(ui, &view.filtered);
                    }
                });
        });
    }
}
