//! Desktop GUI for playing against the engine
//!
//! Built on egui/eframe. The engine searches on a worker thread while the
//! board keeps rendering.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameMode, GameState};
