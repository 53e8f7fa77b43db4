mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::PenguinDashApp;
use config::Settings;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let (settings, status) = Settings::from_env_or_default();
    let dataset = data::loader::bundled().context("loading penguins dataset")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let title = settings.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(dataset, settings, status)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
