//! Album membership markers.
//!
//! An item belongs to an album when the album directory holds a symlink named
//! after the item's file name, pointing at the item. Any album directory is
//! therefore browsable as a plain folder of images by other tools.
//!
//! Where symlinks are unavailable (non-Unix platforms without the privilege to
//! create them) a hard link stands in, and any entry with the right name
//! counts as a marker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{PickerError, Result};

/// Where the marker for `item` lives inside `album_dir`
fn marker_path(album_dir: &Path, item: &Path) -> Option<PathBuf> {
    item.file_name().map(|name| album_dir.join(name))
}

#[cfg(unix)]
fn is_marker(metadata: &fs::Metadata) -> bool {
    metadata.file_type().is_symlink()
}

#[cfg(not(unix))]
fn is_marker(_metadata: &fs::Metadata) -> bool {
    true
}

#[cfg(unix)]
fn link(target: &Path, marker: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, marker)
}

#[cfg(windows)]
fn link(target: &Path, marker: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, marker).or_else(|_| fs::hard_link(target, marker))
}

#[cfg(not(any(unix, windows)))]
fn link(target: &Path, marker: &Path) -> io::Result<()> {
    fs::hard_link(target, marker)
}

/// Whether `album_dir` holds a marker for `item`
pub fn has_marker(album_dir: &Path, item: &Path) -> bool {
    marker_path(album_dir, item)
        .and_then(|path| fs::symlink_metadata(path).ok())
        .is_some_and(|metadata| is_marker(&metadata))
}

/// Create a marker for `target` (an absolute path).
///
/// Returns `false` without touching anything when the name is already taken,
/// whether by an earlier marker or by a stray file.
pub fn create_marker(album_dir: &Path, target: &Path) -> Result<bool> {
    let path = marker_path(album_dir, target).ok_or_else(|| PickerError::Marker {
        path: target.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "item has no file name"),
    })?;

    if let Ok(existing) = fs::symlink_metadata(&path) {
        if !is_marker(&existing) {
            warn!(path = %path.display(), "marker name taken by a non-marker entry");
        }
        return Ok(false);
    }

    match link(target, &path) {
        Ok(()) => {
            debug!(marker = %path.display(), target = %target.display(), "marker created");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(PickerError::Marker { path, source }),
    }
}

/// Remove the marker for `item`, if there is one.
///
/// Failures are logged, not returned. Entries that are not markers are left
/// alone.
pub fn remove_marker(album_dir: &Path, item: &Path) -> bool {
    let Some(path) = marker_path(album_dir, item) else {
        return false;
    };

    match fs::symlink_metadata(&path) {
        Ok(metadata) if is_marker(&metadata) => {}
        Ok(_) => {
            warn!(path = %path.display(), "refusing to remove non-marker entry");
            return false;
        }
        Err(_) => return false,
    }

    removal_outcome(&path, fs::remove_file(&path))
}

fn removal_outcome(path: &Path, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => {
            debug!(marker = %path.display(), "marker removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(marker = %path.display(), error = %e, "failed to remove marker");
            false
        }
    }
}

/// Number of raw entries in an album directory, markers or not
pub fn count_entries(album_dir: &Path) -> Result<usize> {
    let entries = fs::read_dir(album_dir).map_err(|source| PickerError::AlbumDirectory {
        path: album_dir.to_path_buf(),
        source,
    })?;
    Ok(entries.count())
}

/// File names of the markers in an album directory, sorted
pub fn list_markers(album_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(album_dir).map_err(|source| PickerError::AlbumDirectory {
        path: album_dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            fs::symlink_metadata(entry.path())
                .map(|m| is_marker(&m))
                .unwrap_or(false)
        })
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let album = temp.path().join("album");
        fs::create_dir_all(&album).unwrap();
        let image = temp.path().join("photo.jpg");
        fs::write(&image, "data").unwrap();
        (temp, album, image)
    }

    #[test]
    fn test_create_marker_links_to_target() {
        let (_temp, album, image) = setup();

        assert!(create_marker(&album, &image).unwrap());
        assert!(has_marker(&album, &image));
        assert_eq!(fs::read_link(album.join("photo.jpg")).unwrap(), image);
    }

    #[test]
    fn test_create_marker_twice_is_noop() {
        let (_temp, album, image) = setup();

        assert!(create_marker(&album, &image).unwrap());
        assert!(!create_marker(&album, &image).unwrap());
        assert_eq!(count_entries(&album).unwrap(), 1);
    }

    #[test]
    fn test_stray_file_is_not_a_marker() {
        let (_temp, album, image) = setup();
        fs::write(album.join("photo.jpg"), "stray").unwrap();

        assert!(!has_marker(&album, &image));
        assert!(!create_marker(&album, &image).unwrap());
        assert!(!remove_marker(&album, &image));
        assert!(album.join("photo.jpg").exists(), "stray file must survive");
    }

    #[test]
    fn test_remove_marker_absent_is_noop() {
        let (_temp, album, image) = setup();
        assert!(!remove_marker(&album, &image));
    }

    #[test]
    fn test_remove_dangling_marker() {
        let (_temp, album, image) = setup();
        create_marker(&album, &image).unwrap();
        fs::remove_file(&image).unwrap();

        assert!(has_marker(&album, &image));
        assert!(remove_marker(&album, &image));
        assert!(!has_marker(&album, &image));
    }

    #[test]
    fn test_count_includes_strays_but_list_does_not() {
        let (_temp, album, image) = setup();
        create_marker(&album, &image).unwrap();
        fs::write(album.join("README.txt"), "stray").unwrap();

        assert_eq!(count_entries(&album).unwrap(), 2);
        assert_eq!(list_markers(&album).unwrap(), vec!["photo.jpg"]);
    }

    #[test]
    fn test_count_missing_directory() {
        let result = count_entries(Path::new("/nonexistent/album"));
        assert!(matches!(result, Err(PickerError::AlbumDirectory { .. })));
    }

    #[test]
    fn test_removal_failure_is_swallowed() {
        let path = Path::new("/album/photo.jpg");
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");

        assert!(!removal_outcome(path, Err(denied)));
        assert!(!removal_outcome(path, Err(io::ErrorKind::NotFound.into())));
        assert!(removal_outcome(path, Ok(())));
    }

    #[test]
    fn test_remove_marker_in_read_only_album() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, album, image) = setup();
        create_marker(&album, &image).unwrap();
        fs::set_permissions(&album, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users ignore the write bit
        let privileged = fs::write(album.join("write-check"), "").is_ok();
        if !privileged {
            assert!(!remove_marker(&album, &image));
            assert!(has_marker(&album, &image), "marker survives the failed removal");
        }

        fs::set_permissions(&album, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(remove_marker(&album, &image));
    }
}
