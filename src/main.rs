//! BenchGraph - Interactive Numeric Series Charting
//!
//! Enter a series as text, pick a chart type and style, and export the result.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::BenchGraphApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("BenchGraph"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "BenchGraph",
        options,
        Box::new(|cc| Ok(Box::new(BenchGraphApp::new(cc)))),
    )
}
