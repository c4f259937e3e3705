mod app;
pub mod colors;
pub mod dialogs;
pub mod state;
mod ui;
pub mod widgets;

pub use app::run_tui;
