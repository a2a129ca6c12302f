// src/main.rs
use anyhow::Result;
use eframe::egui;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod config;
mod file;
mod state;
mod ui;

use app::WaterDropApp;
use config::Settings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waterdrop=info")),
        )
        .init();

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Using default settings: {:#}", e);
        Settings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("Water Drop Simulation"),
        ..Default::default()
    };

    eframe::run_native(
        "Water Drop Simulation",
        options,
        Box::new(move |_cc| Ok(Box::new(WaterDropApp::new(&settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
