use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::error::{PickerError, Result};

/// Check if a file looks like an image, going by its guessed media type
pub fn is_image_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().starts_with("image/"))
        .unwrap_or(false)
}

/// Enumerates the image files below a root directory
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Lazily walk the tree, yielding image paths relative to the root.
    ///
    /// Entries within a directory come in file-name order, so two walks over
    /// an unchanged tree yield the same sequence. Symlinks are not followed
    /// and never yielded, which keeps album directories living inside the
    /// root from feeding their markers back into the listing.
    pub fn scan_images(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_image_file(entry.path()))
            .filter_map(move |entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(Path::to_path_buf)
            })
    }

    /// Collect every image below the root, sorted by relative path
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn list_images(&self) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(&self.root).map_err(|source| PickerError::Enumerate {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(PickerError::Enumerate {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let mut images: Vec<PathBuf> = self.scan_images().collect();
        images.sort();
        debug!(count = images.len(), "images listed");
        Ok(images)
    }
}

/// Check if a directory entry is hidden (starts with .)
/// Never considers the root entry (depth 0) as hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
