use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::document::{read_keyed, write_document};
use super::items::{absolutize, Browse, ItemList};
use crate::config::PickerConfig;
use crate::error::{PickerError, Result};
use crate::scanner::Scanner;

/// Top-level key of a saved picked list
pub const IMAGES_KEY: &str = "images";

#[derive(Serialize)]
struct PickedDocument {
    images: Vec<PathBuf>,
}

/// Single-collection picking model: one unnamed set of picked images, kept
/// in memory and written out as a flat list on save.
#[derive(Debug, Default)]
pub struct PickedSet {
    items: ItemList,
    picked: BTreeSet<PathBuf>,
    output: Option<PathBuf>,
    /// Picks changed since the last load or save
    dirty: bool,
}

impl PickedSet {
    #[instrument(skip_all, fields(input = %config.input.display()))]
    pub fn open(config: &PickerConfig) -> Result<Self> {
        let mut set = Self {
            output: config.picked_file.clone(),
            ..Self::default()
        };
        set.load(&config.input)?;

        // A directory's own saved list carries the picks of earlier sessions
        if config.input.is_dir() {
            if let Some(output) = config.picked_file.as_deref().filter(|p| p.is_file()) {
                set.load_picked(output)?;
            }
        }
        Ok(set)
    }

    /// Load a directory tree to browse, or a previously saved picked list.
    ///
    /// A saved list becomes both the items to browse and the picked set, so
    /// browsing it narrows an earlier selection down. Relative entries are
    /// taken from the list's own directory. A path that does not exist yet
    /// loads as an empty list.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        if path.is_dir() {
            let root = path.canonicalize().map_err(|source| PickerError::Enumerate {
                path: path.to_path_buf(),
                source,
            })?;
            let images = Scanner::new(root.clone()).list_images()?;
            info!(root = %root.display(), count = images.len(), "loaded images");
            self.items.replace(root, images);
            self.dirty = false;
            return Ok(self.items.len());
        }

        let root = directory_of(path);
        match read_keyed::<Vec<PathBuf>>(path, IMAGES_KEY)? {
            Some(images) => {
                info!(path = %path.display(), count = images.len(), "loaded picked list");
                self.picked = images.iter().cloned().collect();
                self.items.replace(root, images);
            }
            None => {
                info!(path = %path.display(), "no picked list yet, starting empty");
                self.picked.clear();
                self.items.replace(root, Vec::new());
            }
        }
        self.dirty = false;
        Ok(self.items.len())
    }

    /// Replace the picked set with the entries of a saved list, keeping the
    /// items being browsed. Entries under the input root become relative to
    /// it so they match enumerated items. Returns the number of picks.
    pub fn load_picked(&mut self, list: &Path) -> Result<usize> {
        let entries: Vec<PathBuf> = read_keyed(list, IMAGES_KEY)?.unwrap_or_default();
        let base = directory_of(list);
        let root = self.items.root();

        self.picked = entries
            .iter()
            .map(|entry| {
                let absolute = absolutize(&base, entry);
                absolute
                    .strip_prefix(root)
                    .map(Path::to_path_buf)
                    .unwrap_or(absolute)
            })
            .collect();
        self.dirty = false;
        info!(path = %list.display(), count = self.picked.len(), "restored picks");
        Ok(self.picked.len())
    }

    pub fn is_picked(&self, item: &Path) -> bool {
        self.picked.contains(item)
    }

    pub fn is_current_picked(&self) -> Result<bool> {
        Ok(self.is_picked(self.items.current()?))
    }

    /// Returns `false` if the item was already picked
    pub fn pick(&mut self, item: &Path) -> bool {
        let inserted = self.picked.insert(item.to_path_buf());
        self.dirty |= inserted;
        debug!(item = %item.display(), inserted, "pick");
        inserted
    }

    pub fn pick_current(&mut self) -> Result<bool> {
        let item = self.items.current()?.to_path_buf();
        Ok(self.pick(&item))
    }

    /// Returns `false` if the item was not picked
    pub fn unpick(&mut self, item: &Path) -> bool {
        let removed = self.picked.remove(item);
        self.dirty |= removed;
        debug!(item = %item.display(), removed, "unpick");
        removed
    }

    pub fn unpick_current(&mut self) -> Result<bool> {
        let item = self.items.current()?.to_path_buf();
        Ok(self.unpick(&item))
    }

    /// Flip membership of `item`. Returns the membership afterwards.
    pub fn toggle(&mut self, item: &Path) -> bool {
        if self.is_picked(item) {
            self.unpick(item);
            false
        } else {
            self.pick(item);
            true
        }
    }

    pub fn toggle_current(&mut self) -> Result<bool> {
        let item = self.items.current()?.to_path_buf();
        Ok(self.toggle(&item))
    }

    pub fn picked(&self) -> &BTreeSet<PathBuf> {
        &self.picked
    }

    pub fn picked_count(&self) -> usize {
        self.picked.len()
    }

    pub fn input_root(&self) -> &Path {
        self.items.root()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Point future saves at a different file
    pub fn set_output(&mut self, path: PathBuf) {
        self.output = Some(path);
    }

    /// Whether picks changed since the list was loaded or last saved
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Write the picked set, sorted, to the output file. Entries under the
    /// output file's directory are written relative to it, everything else
    /// absolute, so the saved list loads back to the same files.
    /// A no-op while no output file is configured.
    pub fn save(&mut self) -> Result<()> {
        let Some(output) = self.output.as_deref() else {
            debug!("no output file configured, skipping save");
            return Ok(());
        };

        let base = directory_of(output);
        let mut images: Vec<PathBuf> = self
            .picked
            .iter()
            .map(|item| {
                let absolute = self.items.resolve(item);
                absolute
                    .strip_prefix(&base)
                    .map(Path::to_path_buf)
                    .unwrap_or(absolute)
            })
            .collect();
        images.sort();
        images.dedup();

        let count = images.len();
        write_document(output, &PickedDocument { images })?;
        info!(path = %output.display(), count, "picked list saved");
        self.dirty = false;
        Ok(())
    }
}

/// Absolute directory containing `file`, with symlinks resolved when it exists
fn directory_of(file: &Path) -> PathBuf {
    let parent = absolutize(Path::new("."), file.parent().unwrap_or(Path::new("")));
    parent.canonicalize().unwrap_or(parent)
}

impl Browse for PickedSet {
    fn item_list(&self) -> &ItemList {
        &self.items
    }

    fn item_list_mut(&mut self) -> &mut ItemList {
        &mut self.items
    }
}
