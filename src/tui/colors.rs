//! Semantic color constants for consistent TUI styling.

use ratatui::prelude::*;

pub const PICKED_COLOR: Color = Color::Green;
pub const UNPICKED_COLOR: Color = Color::DarkGray;
pub const KEY_COLOR: Color = Color::Cyan;
pub const CURRENT_COLOR: Color = Color::Cyan;
pub const NEIGHBOR_COLOR: Color = Color::DarkGray;
pub const HEADER_COLOR: Color = Color::White;
pub const HELP_TEXT: Color = Color::DarkGray;
pub const INPUT_COLOR: Color = Color::Yellow;
pub const STATUS_BAR_BG: Color = Color::DarkGray;
pub const STATUS_BAR_FG: Color = Color::White;

/// Checkbox-style membership marker (e.g., "[x]").
pub fn format_picked(picked: bool) -> &'static str {
    if picked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Create a styled span for a membership marker.
pub fn styled_picked(picked: bool) -> Span<'static> {
    let color = if picked { PICKED_COLOR } else { UNPICKED_COLOR };
    Span::styled(format_picked(picked), Style::default().fg(color))
}
