mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::QuakePanelApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

/// Interactive earthquake dashboard.
#[derive(Parser, Debug)]
#[command(name = "quake-panel", version, about)]
struct Args {
    /// Earthquake data file (.xlsx, .ods, .csv, .json or .parquet); overrides `data_path`
    /// from the config
    data: Option<PathBuf>,

    /// JSON file with dashboard settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let data_path = args.data.unwrap_or_else(|| config.data_path.clone());

    // A failed load leaves only the error message on screen.
    let mut state = AppState::new(config);
    let _ = state.load(&data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quake Panel – Earthquake Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(QuakePanelApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
