use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{Mode, PickerConfig};
use crate::error::PickerError;
use crate::model::{Browse, PickedSet, PickerModel};

use super::dialogs::{DialogPurpose, InputDialogState};

/// The model behind a session
pub enum Session {
    Albums(PickerModel),
    Legacy(PickedSet),
}

impl Session {
    pub fn open(config: &PickerConfig) -> Result<Self> {
        Ok(match config.mode {
            Mode::Albums => Session::Albums(PickerModel::open(config)?),
            Mode::Legacy => Session::Legacy(PickedSet::open(config)?),
        })
    }

    pub fn browser(&self) -> &dyn Browse {
        match self {
            Session::Albums(model) => model,
            Session::Legacy(set) => set,
        }
    }

    pub fn browser_mut(&mut self) -> &mut dyn Browse {
        match self {
            Session::Albums(model) => model,
            Session::Legacy(set) => set,
        }
    }

    pub fn input_root(&self) -> &Path {
        match self {
            Session::Albums(model) => model.input_root(),
            Session::Legacy(set) => set.input_root(),
        }
    }

    /// Where saves go, if anywhere
    pub fn output(&self) -> Option<&Path> {
        match self {
            Session::Albums(model) => model.registry_file(),
            Session::Legacy(set) => set.output(),
        }
    }

    pub fn save(&mut self) -> crate::Result<()> {
        match self {
            Session::Albums(model) => model.save(),
            Session::Legacy(set) => set.save(),
        }
    }

    /// Save to `path` from now on, and save there right away
    pub fn save_as(&mut self, path: PathBuf) -> crate::Result<()> {
        match self {
            Session::Albums(model) => model.set_registry_file(path),
            Session::Legacy(set) => set.set_output(path),
        }
        self.save()
    }

    /// Browse a different input. Albums and picks are kept, except that a
    /// picked list opened in legacy mode replaces the picked set.
    pub fn reopen(&mut self, path: &Path) -> crate::Result<usize> {
        match self {
            Session::Albums(model) => model.load_items(path),
            Session::Legacy(set) => set.load(path),
        }
    }

    /// Album changes are saved as they happen; only legacy picks can be
    /// pending.
    pub fn has_unsaved_changes(&self) -> bool {
        match self {
            Session::Albums(_) => false,
            Session::Legacy(set) => set.has_unsaved_changes(),
        }
    }
}

/// Previous, current and next file around the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Filmstrip {
    pub prev: PathBuf,
    pub current: PathBuf,
    pub next: PathBuf,
    pub position: usize,
    pub total: usize,
}

/// An album as shown next to the filmstrip
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumRow {
    /// Number key that toggles this album, if it has one
    pub key: Option<char>,
    pub name: String,
    pub picked: bool,
    pub count: usize,
}

/// Albums beyond this many have no number key
pub const MAX_ALBUM_KEYS: usize = 9;

pub struct AppState {
    pub session: Session,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub dialog: Option<InputDialogState>,
    /// Set after a quit was refused over unsaved picks
    pub confirm_quit: bool,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            status_message: None,
            show_help: false,
            dialog: None,
            confirm_quit: false,
        }
    }

    /// Whether the session may end now. Unsaved legacy picks refuse the
    /// first request and allow the second.
    pub fn request_quit(&mut self) -> bool {
        if self.session.has_unsaved_changes() && !self.confirm_quit {
            self.confirm_quit = true;
            self.status_message =
                Some("Unsaved picks: s to save, q again to quit without saving".to_string());
            return false;
        }
        true
    }

    /// Model errors are reported in the status bar rather than ending the
    /// session; only the terminal itself failing does that.
    fn report(&mut self, result: crate::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "operation failed");
            self.status_message = Some(e.to_string());
        }
    }

    pub fn advance(&mut self) {
        self.status_message = None;
        let result = self.session.browser_mut().advance().map(|_| ());
        self.report(result);
    }

    pub fn retreat(&mut self) {
        self.status_message = None;
        let result = self.session.browser_mut().retreat().map(|_| ());
        self.report(result);
    }

    /// Toggle the current file in the album at `index` (in name order)
    pub fn toggle_album(&mut self, index: usize) {
        let Session::Albums(model) = &mut self.session else {
            self.status_message = Some("No albums in legacy mode, use space".to_string());
            return;
        };
        let Some(name) = model.album_names().get(index).map(|n| n.to_string()) else {
            self.status_message = Some(format!("No album {}", index + 1));
            return;
        };

        let result = model.toggle_current(&name).map(|picked| {
            let verb = if picked { "Added to" } else { "Removed from" };
            info!(album = %name, picked, "toggled");
            format!("{} {}", verb, name)
        });
        match result {
            Ok(message) => self.status_message = Some(message),
            Err(e) => self.report(Err(e)),
        }
    }

    /// Toggle the current file in the legacy picked set
    pub fn toggle_picked(&mut self) {
        let Session::Legacy(set) = &mut self.session else {
            self.status_message = Some("Use 1-9 to toggle albums".to_string());
            return;
        };
        match set.toggle_current() {
            Ok(picked) => {
                let message = if picked { "Picked" } else { "Unpicked" };
                self.status_message = Some(message.to_string());
            }
            Err(e) => self.report(Err(e)),
        }
    }

    pub fn save(&mut self) {
        let result = self.session.save();
        let saved = result.is_ok();
        self.report(result);
        if saved {
            self.status_message = Some(match self.session.output() {
                Some(path) => format!("Saved to {}", path.display()),
                None => "Nothing to save to".to_string(),
            });
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn open_add_album_dialog(&mut self) {
        if self.require_albums() {
            self.dialog = Some(InputDialogState::new(DialogPurpose::AddAlbumName, String::new()));
        }
    }

    pub fn open_remove_album_dialog(&mut self) {
        if self.require_albums() {
            self.dialog = Some(InputDialogState::new(DialogPurpose::RemoveAlbum, String::new()));
        }
    }

    pub fn open_save_as_dialog(&mut self) {
        let current = self
            .session
            .output()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.dialog = Some(InputDialogState::new(DialogPurpose::SaveAs, current));
    }

    pub fn open_open_dialog(&mut self) {
        let current = self.session.input_root().display().to_string();
        self.dialog = Some(InputDialogState::new(DialogPurpose::Open, current));
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Apply the dialog's input and close it (or move on to its next step)
    pub fn apply_dialog(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        let value = dialog.value().to_string();
        if value.is_empty() {
            return;
        }

        match dialog.purpose {
            DialogPurpose::AddAlbumName => {
                // Default the directory to the album's name
                let purpose = DialogPurpose::AddAlbumDir { name: value.clone() };
                self.dialog = Some(InputDialogState::new(purpose, value));
            }
            DialogPurpose::AddAlbumDir { name } => self.add_album(&name, Path::new(&value)),
            DialogPurpose::RemoveAlbum => self.remove_album(&value),
            DialogPurpose::SaveAs => {
                let path = PathBuf::from(&value);
                let result = self.session.save_as(path);
                let saved = result.is_ok();
                self.report(result);
                if saved {
                    info!(path = %value, "save target changed");
                    self.status_message = Some(format!("Saved to {}", value));
                }
            }
            DialogPurpose::Open => match self.session.reopen(Path::new(&value)) {
                Ok(count) => {
                    self.status_message = Some(format!("Loaded {} images from {}", count, value));
                }
                Err(e) => self.report(Err(e)),
            },
        }
    }

    fn require_albums(&mut self) -> bool {
        if matches!(self.session, Session::Legacy(_)) {
            self.status_message = Some("No albums in legacy mode".to_string());
            return false;
        }
        true
    }

    fn add_album(&mut self, name: &str, dir: &Path) {
        let Session::Albums(model) = &mut self.session else {
            return;
        };
        match model.add_album(name, dir) {
            Ok(resolved) => {
                self.status_message =
                    Some(format!("Added album {} at {}", name, resolved.display()));
            }
            Err(e) => self.report(Err(e)),
        }
    }

    fn remove_album(&mut self, name: &str) {
        let Session::Albums(model) = &mut self.session else {
            return;
        };
        self.status_message = Some(match model.remove_album(name) {
            Ok(true) => format!("Removed album {} (directory kept)", name),
            Ok(false) => format!("{} not in current album list", name),
            Err(e) => {
                warn!(error = %e, "operation failed");
                e.to_string()
            }
        });
    }

    pub fn filmstrip(&self) -> Option<Filmstrip> {
        let browser = self.session.browser();
        Some(Filmstrip {
            prev: browser.prev_file().ok()?,
            current: browser.current_file().ok()?,
            next: browser.next_file().ok()?,
            position: browser.position(),
            total: browser.len(),
        })
    }

    /// Albums with the current file's membership. Empty in legacy mode.
    pub fn album_rows(&self) -> Vec<AlbumRow> {
        let Session::Albums(model) = &self.session else {
            return Vec::new();
        };

        model
            .album_names()
            .into_iter()
            .enumerate()
            .map(|(index, name)| AlbumRow {
                key: (index < MAX_ALBUM_KEYS)
                    .then(|| char::from_digit(index as u32 + 1, 10))
                    .flatten(),
                name: name.to_string(),
                picked: model.is_current_picked(name).unwrap_or(false),
                count: model.album_count(name).unwrap_or(0),
            })
            .collect()
    }

    /// Picked state and set size for the legacy picked set
    pub fn legacy_summary(&self) -> Option<(bool, usize)> {
        let Session::Legacy(set) = &self.session else {
            return None;
        };
        let picked = match set.is_current_picked() {
            Ok(picked) => picked,
            Err(PickerError::EmptyCollection) => false,
            Err(_) => return None,
        };
        Some((picked, set.picked_count()))
    }
}
