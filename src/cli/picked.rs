use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PickerConfig;
use crate::model::PickedSet;

/// Options for the picked command
#[derive(Debug, Default)]
pub struct PickedOptions {
    pub add: Vec<PathBuf>,
    pub remove: Vec<PathBuf>,
}

/// Add or remove entries of a saved picked list, creating it if needed
///
/// # Arguments
/// * `list_path` - The picked-list file, read and written in place
/// * `options` - What to add/remove; with neither, the list is only read
///
/// # Returns
/// The picked set after any modifications, sorted
pub fn run_picked(list_path: &Path, options: PickedOptions) -> Result<Vec<PathBuf>> {
    let config = PickerConfig::legacy(list_path.to_path_buf(), Some(list_path.to_path_buf()));
    let mut set = PickedSet::open(&config)
        .with_context(|| format!("Failed to load picked list {}", list_path.display()))?;

    let changed = !options.add.is_empty() || !options.remove.is_empty();

    for path in &options.add {
        set.pick(path);
    }

    for path in &options.remove {
        set.unpick(path);
    }

    if changed {
        set.save()?;
    }

    Ok(set.picked().iter().cloned().collect())
}
