use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PickerError, Result};

/// Registry file used when none is given, stored in the input root
pub const REGISTRY_FILENAME: &str = ".imagepicker.json";

/// Picked list used by legacy sessions over a directory when none is given
pub const PICKED_FILENAME: &str = ".imagepicker-picked.json";

/// Which picking model a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Named albums backed by marker directories
    #[default]
    Albums,
    /// One unnamed picked set, saved as a flat list
    Legacy,
}

/// Everything a model needs at construction time
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Directory to browse, or (legacy mode) a previously saved picked list
    pub input: PathBuf,
    /// Album registry file. `None` disables saving.
    pub registry_file: Option<PathBuf>,
    /// Where the legacy picked list is saved. `None` disables saving.
    pub picked_file: Option<PathBuf>,
    pub mode: Mode,
}

impl PickerConfig {
    pub fn albums(input: PathBuf, registry_file: Option<PathBuf>) -> Self {
        Self {
            input,
            registry_file,
            picked_file: None,
            mode: Mode::Albums,
        }
    }

    pub fn legacy(input: PathBuf, picked_file: Option<PathBuf>) -> Self {
        Self {
            input,
            registry_file: None,
            picked_file,
            mode: Mode::Legacy,
        }
    }

    /// Album session saving to `registry_file`, or to the registry in the
    /// input root when none is given
    pub fn with_default_registry(input: PathBuf, registry_file: Option<PathBuf>) -> Self {
        let registry_file = registry_file.unwrap_or_else(|| Self::default_registry_file(&input));
        Self::albums(input, Some(registry_file))
    }

    /// Legacy session saving to `picked_file`. Without one, a saved list
    /// given as input is saved back in place and a directory gets a list in
    /// its root. An input that does not exist is only accepted alongside an
    /// explicit `picked_file`.
    pub fn with_default_picked(input: PathBuf, picked_file: Option<PathBuf>) -> Result<Self> {
        let picked_file = match picked_file {
            Some(file) => file,
            None if input.is_dir() => input.join(PICKED_FILENAME),
            None if input.is_file() => input.clone(),
            None => {
                return Err(PickerError::Enumerate {
                    path: input,
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        "no such directory or picked list (use --picked to start a new list)",
                    ),
                })
            }
        };
        Ok(Self::legacy(input, Some(picked_file)))
    }

    pub fn default_registry_file(input: &Path) -> PathBuf {
        input.join(REGISTRY_FILENAME)
    }
}
