use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PickerConfig;
use crate::model::PickerModel;

/// One row of the album listing
#[derive(Debug, Clone)]
pub struct AlbumInfo {
    pub name: String,
    pub dir: PathBuf,
    /// Raw entries in the album directory
    pub entries: usize,
    /// Entries that are valid markers
    pub markers: usize,
}

pub(crate) fn open_model(config: &PickerConfig) -> Result<PickerModel> {
    PickerModel::open(config)
        .with_context(|| format!("Failed to open library at {}", config.input.display()))
}

/// Register an album, creating its directory
///
/// # Returns
/// The album's resolved directory
pub fn run_album_add(config: &PickerConfig, name: &str, dir: &Path) -> Result<PathBuf> {
    if name.trim().is_empty() {
        anyhow::bail!("Album name must not be empty");
    }
    let mut model = open_model(config)?;
    let resolved = model.add_album(name, dir)?;
    Ok(resolved)
}

/// Forget an album. Its directory and markers stay on disk.
pub fn run_album_remove(config: &PickerConfig, name: &str) -> Result<()> {
    let mut model = open_model(config)?;
    if !model.remove_album(name)? {
        anyhow::bail!("{} not in current album list", name);
    }
    Ok(())
}

/// List registered albums with their sizes, sorted by name
pub fn run_album_list(config: &PickerConfig) -> Result<Vec<AlbumInfo>> {
    let model = open_model(config)?;
    album_infos(&model)
}

pub(crate) fn album_infos(model: &PickerModel) -> Result<Vec<AlbumInfo>> {
    model
        .albums()
        .iter()
        .map(|(name, dir)| {
            Ok(AlbumInfo {
                name: name.clone(),
                dir: dir.clone(),
                entries: model.album_count(name)?,
                markers: model.album_members(name)?.len(),
            })
        })
        .collect()
}
