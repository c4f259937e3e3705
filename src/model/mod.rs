//! Picking state: the ordered images being browsed, the cursor, and the albums
//! images are sorted into.

mod document;
mod items;
mod legacy;
pub mod marker;
mod registry;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::config::PickerConfig;
use crate::error::{PickerError, Result};
use crate::scanner::Scanner;

pub use items::{Browse, ItemList};
pub use legacy::{PickedSet, IMAGES_KEY};
pub use registry::{AlbumRegistry, ALBUMS_KEY};

/// Multi-album picking model.
///
/// Membership lives on disk as markers inside each album's directory, so it
/// survives restarts without being saved. Only the album registry itself is
/// written out, after every change to it.
#[derive(Debug, Default)]
pub struct PickerModel {
    items: ItemList,
    registry: AlbumRegistry,
}

impl PickerModel {
    /// Load the input tree and the album registry named by `config`
    #[instrument(skip_all, fields(input = %config.input.display()))]
    pub fn open(config: &PickerConfig) -> Result<Self> {
        let mut model = Self::default();
        model.load_items(&config.input)?;
        if let Some(registry_file) = &config.registry_file {
            model.load_registry(registry_file)?;
        }
        Ok(model)
    }

    /// Replace the item list with the images found under `root`.
    /// Albums are kept; the cursor is kept while it stays in range.
    pub fn load_items(&mut self, root: &Path) -> Result<usize> {
        let root = root.canonicalize().map_err(|source| PickerError::Enumerate {
            path: root.to_path_buf(),
            source,
        })?;
        let images = Scanner::new(root.clone()).list_images()?;
        info!(root = %root.display(), count = images.len(), "loaded images");
        self.items.replace(root, images);
        Ok(self.items.len())
    }

    /// Load albums from a registry file and make it the save target.
    ///
    /// A missing file starts an empty registry. Relative album directories are
    /// resolved against the input root and created when missing; if any entry
    /// changed in the process the normalized registry is written back.
    #[instrument(skip(self))]
    pub fn load_registry(&mut self, path: &Path) -> Result<()> {
        let entries = AlbumRegistry::read_entries(path)?;

        let mut registry = AlbumRegistry::new(Some(path.to_path_buf()));
        let mut normalized = false;
        for (name, dir) in entries {
            let resolved = self.resolve_album_dir(&dir);
            normalized |= resolved != dir;
            registry.insert(&name, resolved)?;
        }
        self.registry = registry;
        info!(albums = self.registry.albums().len(), "loaded album registry");

        if normalized {
            self.registry.save()?;
        }
        Ok(())
    }

    fn resolve_album_dir(&self, dir: &Path) -> PathBuf {
        items::absolutize(self.items.root(), dir)
    }

    /// Register an album, creating its directory. Re-adding a name points it
    /// at the new directory. Returns the resolved directory.
    #[instrument(skip(self))]
    pub fn add_album(&mut self, name: &str, dir: &Path) -> Result<PathBuf> {
        let resolved = self.resolve_album_dir(dir);
        self.registry.insert(name, resolved.clone())?;
        info!(dir = %resolved.display(), "album added");
        self.registry.save()?;
        Ok(resolved)
    }

    /// Forget an album. The directory and its markers are left on disk.
    /// Returns whether the album was registered.
    #[instrument(skip(self))]
    pub fn remove_album(&mut self, name: &str) -> Result<bool> {
        let removed = self.registry.remove(name);
        if removed {
            info!("album removed");
        }
        self.registry.save()?;
        Ok(removed)
    }

    pub fn is_picked(&self, album: &str, item: &Path) -> Result<bool> {
        let dir = self.registry.dir(album)?;
        Ok(marker::has_marker(dir, item))
    }

    pub fn is_current_picked(&self, album: &str) -> Result<bool> {
        self.registry.dir(album)?;
        let item = self.items.current()?;
        self.is_picked(album, item)
    }

    /// Put `item` into `album`. Returns `false` if it was already there.
    pub fn pick(&mut self, album: &str, item: &Path) -> Result<bool> {
        let dir = self.registry.dir(album)?;
        let target = self.items.resolve(item);
        let created = marker::create_marker(dir, &target)?;
        debug!(album, item = %item.display(), created, "pick");
        Ok(created)
    }

    pub fn pick_current(&mut self, album: &str) -> Result<bool> {
        self.registry.dir(album)?;
        let item = self.items.current()?.to_path_buf();
        self.pick(album, &item)
    }

    /// Take `item` out of `album`. Returns `false` if it was not there or the
    /// marker could not be removed.
    pub fn unpick(&mut self, album: &str, item: &Path) -> Result<bool> {
        let dir = self.registry.dir(album)?;
        let removed = marker::remove_marker(dir, item);
        debug!(album, item = %item.display(), removed, "unpick");
        Ok(removed)
    }

    pub fn unpick_current(&mut self, album: &str) -> Result<bool> {
        self.registry.dir(album)?;
        let item = self.items.current()?.to_path_buf();
        self.unpick(album, &item)
    }

    /// Flip membership of `item` in `album`. Returns the membership afterwards.
    pub fn toggle(&mut self, album: &str, item: &Path) -> Result<bool> {
        if self.is_picked(album, item)? {
            self.unpick(album, item)?;
        } else {
            self.pick(album, item)?;
        }
        self.is_picked(album, item)
    }

    pub fn toggle_current(&mut self, album: &str) -> Result<bool> {
        self.registry.dir(album)?;
        let item = self.items.current()?.to_path_buf();
        self.toggle(album, &item)
    }

    /// Number of entries in the album's directory, including anything that
    /// is not a marker.
    pub fn album_count(&self, name: &str) -> Result<usize> {
        marker::count_entries(self.registry.dir(name)?)
    }

    /// File names of the valid markers in an album, sorted
    pub fn album_members(&self, name: &str) -> Result<Vec<String>> {
        marker::list_markers(self.registry.dir(name)?)
    }

    pub fn album_names(&self) -> Vec<&str> {
        self.registry.albums().keys().map(String::as_str).collect()
    }

    pub fn albums(&self) -> &BTreeMap<String, PathBuf> {
        self.registry.albums()
    }

    pub fn album_dir(&self, name: &str) -> Result<&Path> {
        self.registry.dir(name)
    }

    pub fn input_root(&self) -> &Path {
        self.items.root()
    }

    pub fn items(&self) -> &[PathBuf] {
        self.items.items()
    }

    pub fn registry_file(&self) -> Option<&Path> {
        self.registry.file()
    }

    /// Point future saves at a different registry file
    pub fn set_registry_file(&mut self, path: PathBuf) {
        self.registry.set_file(Some(path));
    }

    /// Write the album registry. A no-op while no registry file is configured.
    pub fn save(&self) -> Result<()> {
        self.registry.save()
    }
}

impl Browse for PickerModel {
    fn item_list(&self) -> &ItemList {
        &self.items
    }

    fn item_list_mut(&mut self) -> &mut ItemList {
        &mut self.items
    }
}


#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::test_helpers::*;
    use super::*;

    #[test]
    fn test_open_loads_sorted_items() {
        let (model, _temp) = create_test_model();
        assert_eq!(model.len(), 3);
        assert_eq!(
            model.items(),
            &[
                PathBuf::from("img1.jpg"),
                PathBuf::from("img2.jpg"),
                PathBuf::from("img3.jpg"),
            ]
        );
        assert!(model.albums().is_empty());
    }

    #[test]
    fn test_pick_then_is_picked() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        assert!(model.pick("favorites", Path::new("img1.jpg")).unwrap());
        assert!(model.is_picked("favorites", Path::new("img1.jpg")).unwrap());
        assert!(!model.is_picked("favorites", Path::new("img2.jpg")).unwrap());
    }

    #[test]
    fn test_marker_points_at_absolute_item() {
        let (mut model, _temp) = create_test_model();
        let dir = model.add_album("favorites", Path::new("fav")).unwrap();
        model.pick("favorites", Path::new("img1.jpg")).unwrap();

        let target = fs::read_link(dir.join("img1.jpg")).unwrap();
        assert_eq!(target, model.input_root().join("img1.jpg"));
        assert!(target.is_absolute());
    }

    #[test]
    fn test_relative_album_dir_resolves_against_input_root() {
        let (mut model, _temp) = create_test_model();
        let dir = model.add_album("favorites", Path::new("fav")).unwrap();

        assert_eq!(dir, model.input_root().join("fav"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_pick_twice_is_noop() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        assert!(model.pick("favorites", Path::new("img1.jpg")).unwrap());
        assert!(!model.pick("favorites", Path::new("img1.jpg")).unwrap());
        assert_eq!(model.album_count("favorites").unwrap(), 1);
    }

    #[test]
    fn test_unpick_absent_is_noop() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        assert!(!model.unpick("favorites", Path::new("img1.jpg")).unwrap());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        for start_picked in [false, true] {
            if start_picked {
                model.pick_current("favorites").unwrap();
            }
            let before = model.is_current_picked("favorites").unwrap();
            assert_eq!(model.toggle_current("favorites").unwrap(), !before);
            assert_eq!(model.toggle_current("favorites").unwrap(), before);
            assert_eq!(model.is_current_picked("favorites").unwrap(), before);
        }
    }

    #[test]
    fn test_current_operations_follow_cursor() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        model.advance().unwrap();
        model.pick_current("favorites").unwrap();

        assert!(model.is_picked("favorites", Path::new("img2.jpg")).unwrap());
        assert!(!model.is_picked("favorites", Path::new("img1.jpg")).unwrap());

        model.unpick_current("favorites").unwrap();
        assert!(!model.is_picked("favorites", Path::new("img2.jpg")).unwrap());
    }

    #[test]
    fn test_unknown_album_is_reported() {
        let (mut model, _temp) = create_test_model();

        assert!(matches!(
            model.is_picked("nonexistent", Path::new("img1.jpg")),
            Err(PickerError::UnknownAlbum(_))
        ));
        assert!(matches!(
            model.pick("nonexistent", Path::new("img1.jpg")),
            Err(PickerError::UnknownAlbum(_))
        ));
        assert!(matches!(
            model.unpick("nonexistent", Path::new("img1.jpg")),
            Err(PickerError::UnknownAlbum(_))
        ));
        assert!(matches!(
            model.toggle_current("nonexistent"),
            Err(PickerError::UnknownAlbum(_))
        ));
        assert!(matches!(
            model.album_count("nonexistent"),
            Err(PickerError::UnknownAlbum(_))
        ));
    }

    #[test]
    fn test_wraparound_over_three_items() {
        let (mut model, _temp) = create_test_model();
        model.advance().unwrap();
        model.advance().unwrap();
        model.advance().unwrap();
        assert_eq!(model.position(), 0);

        model.retreat().unwrap();
        assert_eq!(model.current_file().unwrap(), model.input_root().join("img3.jpg"));
        assert_eq!(model.next_file().unwrap(), model.input_root().join("img1.jpg"));
        assert_eq!(model.prev_file().unwrap(), model.input_root().join("img2.jpg"));
    }

    #[test]
    fn test_round_trip_persistence() {
        let (mut model, temp) = create_test_model();
        let album_dir = temp.path().join("a");
        model.add_album("a", &album_dir).unwrap();
        model.save().unwrap();

        let mut fresh = PickerModel::default();
        fresh.load_items(&temp.path().join("photos")).unwrap();
        fresh.load_registry(&registry_path(&temp)).unwrap();

        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), album_dir);
        assert_eq!(fresh.albums(), &expected);
    }

    #[test]
    fn test_add_album_persists_immediately() {
        let (mut model, temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        let contents = fs::read_to_string(registry_path(&temp)).unwrap();
        assert!(contents.contains("\"albums\""));
        assert!(contents.contains("\"favorites\""));
    }

    #[test]
    fn test_readding_album_overwrites_directory() {
        let (mut model, _temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();
        let second = model.add_album("favorites", Path::new("best")).unwrap();

        assert_eq!(model.album_dir("favorites").unwrap(), second);
        assert_eq!(model.album_names(), vec!["favorites"]);
    }

    #[test]
    fn test_missing_key_fails_load() {
        let (mut model, temp) = create_test_model();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{}").unwrap();

        assert!(matches!(
            model.load_registry(&path),
            Err(PickerError::ConfigFormat { .. })
        ));
    }

    #[test]
    fn test_missing_registry_file_loads_empty() {
        let (mut model, temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        let path = temp.path().join("fresh.json");
        model.load_registry(&path).unwrap();

        assert!(model.albums().is_empty());
        assert_eq!(model.registry_file(), Some(path.as_path()));
        assert!(!path.exists(), "loading an empty registry writes nothing");
    }

    #[test]
    fn test_load_registry_normalizes_relative_entries() {
        let (mut model, temp) = create_test_model();
        let path = temp.path().join("relative.json");
        fs::write(&path, r#"{"albums": {"keep": "keepers"}}"#).unwrap();

        model.load_registry(&path).unwrap();

        let expected = model.input_root().join("keepers");
        assert_eq!(model.album_dir("keep").unwrap(), expected);
        assert!(expected.is_dir());

        let entries = AlbumRegistry::read_entries(&path).unwrap();
        assert_eq!(entries["keep"], expected);
    }

    #[test]
    fn test_failed_load_keeps_previous_registry() {
        let (mut model, temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        let path = temp.path().join("broken.json");
        fs::write(&path, "{}").unwrap();
        assert!(model.load_registry(&path).is_err());

        assert_eq!(model.album_names(), vec!["favorites"]);
        assert_eq!(model.registry_file(), Some(registry_path(&temp).as_path()));
    }

    #[test]
    fn test_remove_album_is_non_destructive() {
        let (mut model, _temp) = create_test_model();
        let dir = model.add_album("a", Path::new("a")).unwrap();
        model.pick("a", Path::new("img1.jpg")).unwrap();

        assert!(model.remove_album("a").unwrap());

        assert!(model.albums().is_empty());
        assert!(dir.is_dir());
        assert!(fs::symlink_metadata(dir.join("img1.jpg")).is_ok());
    }

    #[test]
    fn test_remove_unknown_album_is_noop() {
        let (mut model, _temp) = create_test_model();
        assert!(!model.remove_album("nope").unwrap());
    }

    #[test]
    fn test_album_count_counts_raw_entries() {
        let (mut model, _temp) = create_test_model();
        let dir = model.add_album("a", Path::new("a")).unwrap();
        model.pick("a", Path::new("img1.jpg")).unwrap();
        model.pick("a", Path::new("img2.jpg")).unwrap();
        fs::write(dir.join("notes.txt"), "stray").unwrap();

        assert_eq!(model.album_count("a").unwrap(), 3);
        assert_eq!(model.album_members("a").unwrap(), vec!["img1.jpg", "img2.jpg"]);
    }

    #[test]
    fn test_membership_survives_reopen() {
        let (mut model, temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();
        model.pick("favorites", Path::new("img3.jpg")).unwrap();

        let config = PickerConfig::albums(temp.path().join("photos"), Some(registry_path(&temp)));
        let reopened = PickerModel::open(&config).unwrap();

        assert!(reopened.is_picked("favorites", Path::new("img3.jpg")).unwrap());
    }

    #[test]
    fn test_save_without_registry_file_is_noop() {
        let (_model, temp) = create_test_model();
        let config = PickerConfig::albums(temp.path().join("photos"), None);
        let mut unsaved = PickerModel::open(&config).unwrap();
        unsaved.add_album("a", Path::new("elsewhere")).unwrap();
        unsaved.save().unwrap();

        assert!(unsaved.registry_file().is_none());
        assert!(!registry_path(&temp).exists());
    }

    #[test]
    fn test_empty_input_reports_empty_collection() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = PickerConfig::albums(temp.path().to_path_buf(), None);
        let mut model = PickerModel::open(&config).unwrap();
        model.add_album("a", Path::new("a")).unwrap();

        assert!(model.is_empty());
        assert!(matches!(model.advance(), Err(PickerError::EmptyCollection)));
        assert!(matches!(model.current_file(), Err(PickerError::EmptyCollection)));
        assert!(matches!(model.pick_current("a"), Err(PickerError::EmptyCollection)));
    }

    #[test]
    fn test_reload_keeps_albums() {
        let (mut model, temp) = create_test_model();
        model.add_album("favorites", Path::new("fav")).unwrap();

        let other = temp.path().join("other");
        fs::create_dir_all(&other).unwrap();
        fs::write(other.join("new.png"), "data").unwrap();

        assert_eq!(model.load_items(&other).unwrap(), 1);
        assert_eq!(model.album_names(), vec!["favorites"]);
        assert_eq!(model.current_file().unwrap(), other.canonicalize().unwrap().join("new.png"));
    }

    #[test]
    fn test_open_nonexistent_input() {
        let config = PickerConfig::albums(PathBuf::from("/nonexistent/photos"), None);
        assert!(matches!(
            PickerModel::open(&config),
            Err(PickerError::Enumerate { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_unpick_keeps_model_usable() {
        use std::os::unix::fs::PermissionsExt;

        let (mut model, _temp) = create_test_model();
        let dir = model.add_album("favorites", Path::new("fav")).unwrap();
        model.pick("favorites", Path::new("img1.jpg")).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users ignore the write bit
        if fs::write(dir.join("write-check"), "").is_err() {
            assert!(!model.unpick("favorites", Path::new("img1.jpg")).unwrap());
            assert!(model.is_picked("favorites", Path::new("img1.jpg")).unwrap());
            assert_eq!(model.advance().unwrap(), 1);
        }

        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(model.unpick("favorites", Path::new("img1.jpg")).unwrap());
    }
}
