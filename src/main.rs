//! Language Proximity Explorer - interactive viewer for language similarity data
//!
//! Reads precomputed proximity, outlier and community CSV files and shows
//! them as a network graph, heatmaps, charts and tables.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Result;
use config::AppConfig;
use eframe::egui;
use gui::ExplorerApp;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::parse();
    tracing::debug!(?config, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 950.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Language Proximity Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Language Proximity Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the window: {e}"))
}
