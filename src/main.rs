mod app;
mod color;
mod config;
mod data;
mod error;
mod report;
mod state;
mod ui;

use std::sync::Arc;

use app::CareerLensApp;
use config::DashboardConfig;
use eframe::egui;
use state::{AppState, Screen};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();

    // Loaded exactly once; every view borrows from this shared table.
    let screen = match data::loader::load(&config.data_path) {
        Ok(dataset) => Screen::Dashboard(AppState::new(Arc::new(dataset), config.clone())),
        Err(e) => Screen::LoadFailed(e),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Career Lens – Promotion Risk Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CareerLensApp::new(screen)))),
    )
}
