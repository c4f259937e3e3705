use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::document::{read_keyed, write_document};
use crate::error::{PickerError, Result};

/// Top-level key of the registry document
pub const ALBUMS_KEY: &str = "albums";

#[derive(Serialize)]
struct RegistryDocument<'a> {
    albums: &'a BTreeMap<String, PathBuf>,
}

/// Album name to directory mapping, plus the file it is persisted to
#[derive(Debug, Default)]
pub struct AlbumRegistry {
    albums: BTreeMap<String, PathBuf>,
    file: Option<PathBuf>,
}

impl AlbumRegistry {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            albums: BTreeMap::new(),
            file,
        }
    }

    /// Read the raw entries of a registry file. A missing file is a first run
    /// and reads as no entries.
    pub fn read_entries(path: &Path) -> Result<BTreeMap<String, PathBuf>> {
        let entries = read_keyed(path, ALBUMS_KEY)?;
        if entries.is_none() {
            info!(path = %path.display(), "no registry file yet, starting empty");
        }
        Ok(entries.unwrap_or_default())
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, file: Option<PathBuf>) {
        self.file = file;
    }

    pub fn albums(&self) -> &BTreeMap<String, PathBuf> {
        &self.albums
    }

    pub fn dir(&self, name: &str) -> Result<&Path> {
        self.albums
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| PickerError::UnknownAlbum(name.to_string()))
    }

    /// Record an album, creating its directory if needed. `dir` must already
    /// be absolute. Re-inserting a name replaces its directory.
    pub fn insert(&mut self, name: &str, dir: PathBuf) -> Result<()> {
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| PickerError::AlbumDirectory {
                path: dir.clone(),
                source,
            })?;
            debug!(dir = %dir.display(), "created album directory");
        }
        self.albums.insert(name.to_string(), dir);
        Ok(())
    }

    /// Forget an album. Its directory and markers stay on disk.
    pub fn remove(&mut self, name: &str) -> bool {
        self.albums.remove(name).is_some()
    }

    /// Write the mapping to the registry file, if one is configured
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.file.as_deref() else {
            debug!("no registry file configured, skipping save");
            return Ok(());
        };

        write_document(
            path,
            &RegistryDocument {
                albums: &self.albums,
            },
        )?;
        debug!(path = %path.display(), albums = self.albums.len(), "registry saved");
        Ok(())
    }
}
