mod app;
mod data;
mod error;
mod settings;
mod state;
mod stats;
mod ui;

use app::BikeShareApp;
use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let app = match Settings::from_env() {
        Ok(settings) => {
            log::info!("Reading trip files from {}", settings.data_dir.display());
            BikeShareApp::new(settings)
        }
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            BikeShareApp::failed(format!("Error: {e}"))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([520.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Share Statistics",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
