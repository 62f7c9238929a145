use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use startup_dashboard::app::StartupDashboardApp;
use startup_dashboard::config::{Args, DashboardConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = DashboardConfig::from(&args);
    log::info!("Starting dashboard with {}", config.data_file.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Startup Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(StartupDashboardApp::new(&config)))),
    )
    .map_err(|e| anyhow!("{e}"))
    .context("running the dashboard window")
}
