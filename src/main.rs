// Samidare Application
// Main entry point

use std::path::PathBuf;

use anyhow::anyhow;
use samidare::services::settings::SettingsService;
use samidare::ui_egui::SamidareApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("Starting Samidare");

    // Optional first argument overrides the settings file location
    let service = match std::env::args_os().nth(1) {
        Some(path) => SettingsService::new(PathBuf::from(path)),
        None => SettingsService::from_default_location(),
    };
    log::info!("Using settings at {}", service.path().display());
    let settings = service.load_or_default();

    let app = SamidareApp::new(settings)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 800.0])
            .with_min_inner_size([360.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native("Samidare", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|err| anyhow!("failed to launch Samidare: {err}"))
}
