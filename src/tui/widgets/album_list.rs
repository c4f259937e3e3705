use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::tui::colors::{styled_picked, HEADER_COLOR, HELP_TEXT, KEY_COLOR};
use crate::tui::state::AppState;

pub fn render_album_list(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some((_, count)) = state.legacy_summary() {
        let text = Paragraph::new(vec![
            Line::from(format!(" {} picked", count)),
            Line::from(""),
            Line::from(Span::styled(" space: toggle current", Style::default().fg(HELP_TEXT))),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Picked "));
        frame.render_widget(text, area);
        return;
    }

    let albums = state.album_rows();
    if albums.is_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            " No albums yet, press a to add one",
            Style::default().fg(HELP_TEXT),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Albums "));
        frame.render_widget(text, area);
        return;
    }

    let rows: Vec<Row> = albums
        .iter()
        .map(|album| {
            let key = album.key.map(String::from).unwrap_or_default();
            Row::new(vec![
                Cell::from(Span::styled(key, Style::default().fg(KEY_COLOR))),
                Cell::from(styled_picked(album.picked)),
                Cell::from(album.name.as_str()),
                Cell::from(album.count.to_string()),
            ])
        })
        .collect();

    let header = Row::new(vec!["", "", "Album", "Size"])
        .style(
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let widths = [
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(6),
    ];

    let title = format!(" Albums ({}) ", albums.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
