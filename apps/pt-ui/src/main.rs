#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::collapsible_if)]

mod app;
mod layer;
mod views;

use std::path::PathBuf;

use app::InspectorApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional first argument: inspector config file.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let session = match InspectorApp::open_session(config_path.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to start inspector: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("proptrace"),
        ..Default::default()
    };

    eframe::run_native(
        "proptrace",
        options,
        Box::new(|cc| Ok(Box::new(InspectorApp::new(cc, session)))),
    )
}
