#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;

mod app;
mod canvas;

use app::BridgeBoardApp;

fn main() -> eframe::Result<()> {
    // Log to stdout; filter with `RUST_LOG=debug` etc.
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BridgeBoard",
        options,
        Box::new(|_cc| Ok(Box::new(BridgeBoardApp::new()))),
    )
}
