//! Gomoku AI GUI
//!
//! Play Gomoku against the alpha-beta engine on a 15x15 board.

use std::io::Write;

use gomoku::config::EngineConfig;
use gomoku::ui::GomokuApp;
use log::{info, warn};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    let config = EngineConfig::from_env().unwrap_or_else(|err| {
        warn!("ignoring engine settings from environment: {err}");
        EngineConfig::default()
    });
    info!(
        "engine depth {} candidates {} transposition {}",
        config.depth, config.candidate_limit, config.use_transposition
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("Gomoku AI"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, config)))),
    )
}
