use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::Paragraph,
};

use crate::tui::colors::{STATUS_BAR_BG, STATUS_BAR_FG};
use crate::tui::state::{AppState, Session};

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts = Vec::new();

    let mode = match state.session {
        Session::Albums(_) => "Albums",
        Session::Legacy(_) => "Picked",
    };
    parts.push(format!("[{}]", mode));

    if let Some(ref message) = state.status_message {
        parts.push(message.clone());
    }

    let hints = match state.session {
        Session::Albums(_) => "←/→:move  1-9:album  a/r:add/remove  ?:help  q:quit",
        Session::Legacy(_) => "←/→:move  space:pick  s:save  ?:help  q:quit",
    };

    let left_part = parts.join(" | ");
    let width = (area.width as usize).saturating_sub(hints.chars().count());
    let status_text = format!("{:width$}{}", left_part, hints, width = width);

    let status = Paragraph::new(status_text)
        .style(Style::default().bg(STATUS_BAR_BG).fg(STATUS_BAR_FG));

    frame.render_widget(status, area);
}
