use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::colors::{HEADER_COLOR, HELP_TEXT, INPUT_COLOR};
use crate::tui::dialogs::InputDialogState;

pub fn render_input_dialog(frame: &mut Frame, area: Rect, dialog: &InputDialogState) {
    let popup_width = 60.min(area.width);
    let popup_height = 7.min(area.height);
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(dialog.purpose.title())
        .title_style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD))
        .padding(ratatui::widgets::Padding::horizontal(1));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(dialog.purpose.prompt()), chunks[0]);
    render_input_with_cursor(frame, chunks[1], dialog);

    let help = Paragraph::new("Enter:OK  Esc:Cancel").style(Style::default().fg(HELP_TEXT));
    frame.render_widget(help, chunks[3]);
}

fn render_input_with_cursor(frame: &mut Frame, area: Rect, dialog: &InputDialogState) {
    let (before_cursor, rest) = dialog.input.split_at(dialog.cursor_pos);
    let mut chars = rest.chars();
    let at_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
    let after_cursor = chars.as_str();

    let line = Line::from(vec![
        Span::raw("> "),
        Span::raw(before_cursor),
        Span::styled(at_cursor, Style::default().bg(Color::White).fg(Color::Black)),
        Span::raw(after_cursor),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().fg(INPUT_COLOR));
    frame.render_widget(paragraph, area);
}
