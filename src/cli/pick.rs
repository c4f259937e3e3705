use std::path::Path;

use anyhow::Result;

use super::album::open_model;
use crate::config::PickerConfig;

/// What to do with each file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickAction {
    Pick,
    Unpick,
    Toggle,
}

/// Change album membership of files
///
/// # Arguments
/// * `config` - Library and registry to operate on
/// * `album` - Name of a registered album
/// * `files` - Files to change (relative to the library root, or absolute)
///
/// # Returns
/// Membership of each file afterwards, in argument order
pub fn run_pick(
    config: &PickerConfig,
    album: &str,
    files: &[&Path],
    action: PickAction,
) -> Result<Vec<bool>> {
    let mut model = open_model(config)?;
    // Fail before touching anything
    model.album_dir(album)?;

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        if !model.input_root().join(file).exists() {
            anyhow::bail!("File not found in library: {}", file.display());
        }
        let picked = match action {
            PickAction::Pick => {
                model.pick(album, file)?;
                model.is_picked(album, file)?
            }
            PickAction::Unpick => {
                model.unpick(album, file)?;
                model.is_picked(album, file)?
            }
            PickAction::Toggle => model.toggle(album, file)?,
        };
        results.push(picked);
    }
    Ok(results)
}
