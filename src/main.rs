mod app;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::SalaryDashboardApp;
use config::{DashboardConfig, CONFIG_FILE_NAME};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME)).unwrap_or_else(|e| {
        log::error!("{e}; falling back to defaults");
        DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(SalaryDashboardApp::new(&cc.egui_ctx, &config)))),
    )
}
