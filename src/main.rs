#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use device_panel::{Args, DevicePanel, INITIAL_HEIGHT, INITIAL_WIDTH, PROGRAM_TITLE};
use eframe::egui;

// Application Entry Point
fn main() -> eframe::Result<()> {
    // Initialize logging
    #[cfg(feature = "logging")]
    env_logger::init();

    let args = Args::parse();

    log::info!("Starting {}", PROGRAM_TITLE);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WIDTH, INITIAL_HEIGHT])
            .with_title(PROGRAM_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        PROGRAM_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DevicePanel::new(&args)))),
    )
}
