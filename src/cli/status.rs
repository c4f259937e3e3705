use std::path::PathBuf;

use anyhow::Result;

use super::album::{album_infos, open_model, AlbumInfo};
use crate::config::PickerConfig;
use crate::model::Browse;

/// Snapshot of a library and its albums
#[derive(Debug)]
pub struct StatusReport {
    pub input_root: PathBuf,
    pub registry_file: Option<PathBuf>,
    pub images: usize,
    pub albums: Vec<AlbumInfo>,
}

/// Gather library status: image count and per-album sizes
pub fn run_status(config: &PickerConfig) -> Result<StatusReport> {
    let model = open_model(config)?;

    Ok(StatusReport {
        input_root: model.input_root().to_path_buf(),
        registry_file: model.registry_file().map(|p| p.to_path_buf()),
        images: model.len(),
        albums: album_infos(&model)?,
    })
}
