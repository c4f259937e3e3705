/// What a text-input dialog is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPurpose {
    /// Name of a new album
    AddAlbumName,
    /// Directory of the album named in the previous step
    AddAlbumDir { name: String },
    RemoveAlbum,
    /// New registry or picked-list file to save to
    SaveAs,
    /// Directory or picked list to browse instead
    Open,
}

impl DialogPurpose {
    pub fn title(&self) -> String {
        match self {
            DialogPurpose::AddAlbumName => " Add Album ".to_string(),
            DialogPurpose::AddAlbumDir { name } => format!(" Directory for '{}' ", name),
            DialogPurpose::RemoveAlbum => " Remove Album ".to_string(),
            DialogPurpose::SaveAs => " Save To File ".to_string(),
            DialogPurpose::Open => " Open ".to_string(),
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            DialogPurpose::AddAlbumName | DialogPurpose::RemoveAlbum => "Album name:",
            DialogPurpose::AddAlbumDir { .. } => "Directory (relative to the input root):",
            DialogPurpose::SaveAs => "File:",
            DialogPurpose::Open => "Directory or picked list:",
        }
    }
}

/// State for the single-line text-input popup
#[derive(Debug)]
pub struct InputDialogState {
    pub purpose: DialogPurpose,
    pub input: String,
    pub cursor_pos: usize,
}

impl InputDialogState {
    pub fn new(purpose: DialogPurpose, initial: String) -> Self {
        let cursor_pos = initial.len();
        Self {
            purpose,
            input: initial,
            cursor_pos,
        }
    }

    /// The entered text without surrounding whitespace
    pub fn value(&self) -> &str {
        self.input.trim()
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let new_pos = self.prev_boundary();
            self.input.remove(new_pos);
            self.cursor_pos = new_pos;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            let mut new_pos = self.cursor_pos + 1;
            while new_pos < self.input.len() && !self.input.is_char_boundary(new_pos) {
                new_pos += 1;
            }
            self.cursor_pos = new_pos;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    fn prev_boundary(&self) -> usize {
        let mut pos = self.cursor_pos - 1;
        while pos > 0 && !self.input.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog(text: &str) -> InputDialogState {
        InputDialogState::new(DialogPurpose::AddAlbumName, text.to_string())
    }

    #[test]
    fn test_cursor_starts_at_end() {
        let state = dialog("best");
        assert_eq!(state.cursor_pos, 4);
    }

    #[test]
    fn test_insert_char() {
        let mut state = dialog("test");
        state.cursor_pos = 2;
        state.insert_char('X');
        assert_eq!(state.input, "teXst");
        assert_eq!(state.cursor_pos, 3);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut state = dialog("test");
        state.cursor_pos = 0;
        state.backspace();
        assert_eq!(state.input, "test");
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = dialog("café");
        state.backspace();
        assert_eq!(state.input, "caf");

        state.insert_char('é');
        state.move_cursor_left();
        assert_eq!(state.cursor_pos, 3);
        state.delete();
        assert_eq!(state.input, "caf");
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = dialog("test");
        state.move_cursor_left();
        assert_eq!(state.cursor_pos, 3);
        state.move_cursor_home();
        assert_eq!(state.cursor_pos, 0);
        state.move_cursor_right();
        assert_eq!(state.cursor_pos, 1);
        state.move_cursor_end();
        assert_eq!(state.cursor_pos, 4);
    }

    #[test]
    fn test_value_is_trimmed() {
        assert_eq!(dialog("  summer  ").value(), "summer");
    }

    #[test]
    fn test_titles_name_the_album() {
        let purpose = DialogPurpose::AddAlbumDir {
            name: "best".to_string(),
        };
        assert!(purpose.title().contains("best"));
    }
}
