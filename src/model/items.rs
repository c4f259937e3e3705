use std::path::{Component, Path, PathBuf};

use crate::error::{PickerError, Result};

/// Navigation direction for wrapping list movement
#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Advance an index within a wrapping list. `count` must be non-zero.
fn wrap_index(current: usize, count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => {
            if current + 1 < count { current + 1 } else { 0 }
        }
        Direction::Backward => {
            if current > 0 { current - 1 } else { count - 1 }
        }
    }
}

/// Resolve `path` against `base` and normalize it lexically.
///
/// Symlinks are not resolved: an item reached through a linked directory keeps
/// the path the user browsed to.
pub(crate) fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let joined = std::path::absolute(&joined).unwrap_or(joined);

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// The ordered items being browsed plus the cursor into them
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    root: PathBuf,
    items: Vec<PathBuf>,
    cursor: usize,
}

impl ItemList {
    pub fn new(root: PathBuf, items: Vec<PathBuf>) -> Self {
        Self {
            root,
            items,
            cursor: 0,
        }
    }

    /// Swap in a freshly loaded list. The cursor survives if it still points
    /// inside the new list and goes back to the start otherwise.
    pub fn replace(&mut self, root: PathBuf, items: Vec<PathBuf>) {
        self.root = root;
        self.items = items;
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn advance(&mut self) -> Result<usize> {
        self.cursor = self.neighbour(Direction::Forward)?;
        Ok(self.cursor)
    }

    pub fn retreat(&mut self) -> Result<usize> {
        self.cursor = self.neighbour(Direction::Backward)?;
        Ok(self.cursor)
    }

    /// The identifier at the cursor, as it was loaded (relative or absolute)
    pub fn current(&self) -> Result<&Path> {
        self.items
            .get(self.cursor)
            .map(PathBuf::as_path)
            .ok_or(PickerError::EmptyCollection)
    }

    /// Absolute path of an item identifier, relative ones taken from the root
    pub fn resolve(&self, item: &Path) -> PathBuf {
        absolutize(&self.root, item)
    }

    pub fn current_file(&self) -> Result<PathBuf> {
        Ok(self.resolve(self.current()?))
    }

    pub fn next_file(&self) -> Result<PathBuf> {
        let index = self.neighbour(Direction::Forward)?;
        Ok(self.resolve(&self.items[index]))
    }

    pub fn prev_file(&self) -> Result<PathBuf> {
        let index = self.neighbour(Direction::Backward)?;
        Ok(self.resolve(&self.items[index]))
    }

    fn neighbour(&self, direction: Direction) -> Result<usize> {
        if self.items.is_empty() {
            return Err(PickerError::EmptyCollection);
        }
        Ok(wrap_index(self.cursor, self.items.len(), direction))
    }
}

/// Cursor navigation shared by the album model and the picked-set model
pub trait Browse {
    fn item_list(&self) -> &ItemList;
    fn item_list_mut(&mut self) -> &mut ItemList;

    /// Step to the next file, wrapping around past the end
    fn advance(&mut self) -> Result<usize> {
        self.item_list_mut().advance()
    }

    /// Step to the previous file, wrapping around past the start
    fn retreat(&mut self) -> Result<usize> {
        self.item_list_mut().retreat()
    }

    fn current_file(&self) -> Result<PathBuf> {
        self.item_list().current_file()
    }

    fn next_file(&self) -> Result<PathBuf> {
        self.item_list().next_file()
    }

    fn prev_file(&self) -> Result<PathBuf> {
        self.item_list().prev_file()
    }

    fn position(&self) -> usize {
        self.item_list().position()
    }

    /// How many files are loaded in total
    fn len(&self) -> usize {
        self.item_list().len()
    }

    fn is_empty(&self) -> bool {
        self.item_list().is_empty()
    }
}
