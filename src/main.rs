//! Green Board - League GREEN ranking dashboard
//!
//! Loads a semicolon-delimited league CSV, sorts it by the GREEN count and
//! shows the top leagues in a table and a bar chart driven by a slider.

mod binder;
mod charts;
mod config;
mod data;
mod gui;

use anyhow::Context;
use binder::ViewBinder;
use config::AppConfig;
use eframe::egui;
use gui::DashboardApp;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::load()?;

    // Fail fast: the window never opens on a bad input file
    let dataset = data::load_and_sort(&config.csv_path)
        .inspect_err(|e| error!("startup aborted: {}", e))
        .with_context(|| format!("loading {}", config.csv_path.display()))?;

    let binder = ViewBinder::new(Arc::new(dataset), &config);

    let dataset = binder.dataset();
    if dataset.is_empty() {
        warn!("{} has no data rows", config.csv_path.display());
    }
    let missing = dataset
        .records()
        .iter()
        .filter(|r| r.green.is_none())
        .count();
    if missing > 0 {
        info!("{} rows with non-numeric GREEN sorted last", missing);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Green Board"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Green Board",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, binder)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))
}
