pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod scanner;
pub mod tui;

pub use config::{Mode, PickerConfig};
pub use error::{PickerError, Result};
pub use model::{Browse, PickedSet, PickerModel};
