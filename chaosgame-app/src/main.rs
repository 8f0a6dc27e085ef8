mod app;

use eframe::egui;
use tracing::info;

use app::ChaosGameApp;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting the Chaos Game");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("The Chaos Game")
            .with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Chaos Game",
        options,
        Box::new(|_cc| Ok(Box::new(ChaosGameApp::default()))),
    )
}
