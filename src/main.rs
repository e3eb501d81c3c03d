mod app;
mod color;
mod config;
mod data;
mod error;
mod projection;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("reading configuration")?;

    // The dataset is read exactly once; every view borrows from this handle.
    let dataset = match data::loader::load_file(&config.data_path) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            log::error!("Failed to load {}: {e}", config.data_path.display());
            return Err(e).with_context(|| format!("loading {}", config.data_path.display()));
        }
    };
    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tableau de Bord – Facteurs de Performances des Étudiants",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
