use std::path::Path;

use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::tui::colors::{styled_picked, CURRENT_COLOR, HELP_TEXT, NEIGHBOR_COLOR};
use crate::tui::state::AppState;

/// Path shown for a file: relative to the browsed root when under it
fn display_name<'a>(root: &Path, file: &'a Path) -> std::borrow::Cow<'a, str> {
    file.strip_prefix(root).unwrap_or(file).to_string_lossy()
}

pub fn render_filmstrip(frame: &mut Frame, area: Rect, state: &AppState) {
    let root = state.session.input_root();

    let Some(strip) = state.filmstrip() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No images found",
            Style::default().fg(HELP_TEXT),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Images "));
        frame.render_widget(empty, area);
        return;
    };

    let mut current = vec![
        Span::styled(" ▸ ", Style::default().fg(CURRENT_COLOR)),
        Span::styled(
            display_name(root, &strip.current).into_owned(),
            Style::default()
                .fg(CURRENT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some((picked, _)) = state.legacy_summary() {
        current.push(Span::raw("  "));
        current.push(styled_picked(picked));
    }

    let lines = vec![
        Line::from(Span::styled(
            format!("   {}", display_name(root, &strip.prev)),
            Style::default().fg(NEIGHBOR_COLOR),
        )),
        Line::from(current),
        Line::from(Span::styled(
            format!("   {}", display_name(root, &strip.next)),
            Style::default().fg(NEIGHBOR_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}", strip.current.display()),
            Style::default().fg(HELP_TEXT),
        )),
    ];

    let title = format!(" Image {}/{} ", strip.position + 1, strip.total);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(paragraph, area);
}
